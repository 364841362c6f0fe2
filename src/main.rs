use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use etcd_compose::config::load_config;
use etcd_compose::emit::DirSink;
use etcd_compose::render::ManifestTemplate;
use etcd_compose::spec::{self, BASELINE};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "etcd-compose")]
#[command(about = "Generate per-node docker-compose manifests for an etcd cluster", long_about = None)]
struct Cli {
    /// Log resolution details (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the cluster config and write one manifest per node.
    Generate {
        /// Cluster config (YAML). Reads stdin when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, default_value = "tmpl/compose-etcd.yaml")]
        template: PathBuf,

        #[arg(short = 'o', long, default_value = "compose")]
        out: PathBuf,
    },
    /// Print the resolved node specs as JSON without writing anything.
    Resolve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "etcd_compose=debug"
    } else {
        "etcd_compose=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Generate {
            config,
            template,
            out,
        } => {
            // 1) Parse the cluster config (stdin unless --config).
            let cluster = load_config(config.as_deref())?;

            // 2) Compile the manifest template once for every node.
            let tmpl = ManifestTemplate::load(&template)?;

            // 3) Resolve the whole batch, then render + write each manifest.
            let mut sink = DirSink::new(out);
            let written = etcd_compose::generate(cluster, &BASELINE, &tmpl, &mut sink)
                .context("generate manifests")?;
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
        Commands::Resolve { config } => {
            let cluster = load_config(config.as_deref())?;
            let specs = spec::resolve(cluster, &BASELINE).context("resolve node specs")?;
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
    }

    Ok(())
}
