//! merkle CLI - Command line interface for merkle_tree
//!
//! Builds a tree over the given items and prints the root digest, checks
//! membership, or produces and checks membership proofs.

use clap::{Parser, Subcommand};
use merkle_tree::{Blake3, Bytes, Hash, Hasher, MerkleProof, MerkleTree, Sha256};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "merkle")]
#[command(about = "Build and verify binary Merkle trees")]
#[command(version)]
struct Cli {
    /// Hash function used for every digest in the tree
    /// (use sha256 for roots compatible with other SHA-256 implementations)
    #[arg(long = "hash", global = true, default_value = "blake3")]
    hash: HashAlgorithm,

    /// Output format (json or text)
    #[arg(short, long, global = true, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum HashAlgorithm {
    Blake3,
    Sha256,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tree and print its leaves and root digest
    Root {
        /// Content items, in order
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Check whether an item is a member of the tree built from ITEMS
    Verify {
        /// The item to look for
        item: String,
        /// Content items, in order
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Print a membership proof for an item
    Proof {
        /// The item to prove
        item: String,
        /// Content items, in order
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Check a membership proof against a root digest
    Check {
        /// Trusted root digest (hex)
        #[arg(short, long)]
        root: String,
        /// Proof as printed by `proof` (JSON)
        #[arg(short, long)]
        proof: String,
        /// Optional item the proof should be for
        #[arg(short, long)]
        item: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.hash {
        HashAlgorithm::Blake3 => run::<Blake3>(&cli),
        HashAlgorithm::Sha256 => run::<Sha256>(&cli),
    }
}

fn run<H: Hasher>(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Root { items } => {
            let tree = build_tree::<H>(items)?;
            match cli.format {
                OutputFormat::Json => {
                    let leaves: Vec<serde_json::Value> = (0..tree.leaf_count())
                        .filter_map(|position| tree.leaf(position))
                        .map(|leaf| {
                            serde_json::json!({
                                "digest": leaf.digest(),
                                "duplicate": leaf.is_duplicate(),
                            })
                        })
                        .collect();
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "ok",
                            "hash": H::NAME,
                            "root": tree.root_digest(),
                            "leaves": leaves,
                        }),
                    );
                }
                OutputFormat::Text => {
                    print!("{tree}");
                    println!("root: {}", tree.root_digest());
                }
            }
        }

        Commands::Verify { item, items } => {
            let tree = build_tree::<H>(items)?;
            let member = tree.verify_content(&Bytes::from(item.as_str()))?;
            info!(item = %item, member, "verified membership");
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "item": item,
                    "member": member,
                    "root": tree.root_digest(),
                }),
            );
        }

        Commands::Proof { item, items } => {
            let tree = build_tree::<H>(items)?;
            let proof = tree
                .proof(&Bytes::from(item.as_str()))?
                .ok_or_else(|| anyhow::anyhow!("Item not found: {}", item))?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "root": tree.root_digest(),
                    "proof": proof,
                }),
            );
        }

        Commands::Check { root, proof, item } => {
            let root: Hash = root.parse()?;
            let proof: MerkleProof = serde_json::from_str(proof)?;
            let valid = match item {
                Some(item) => proof.verify_content::<_, H>(&Bytes::from(item.as_str()), &root)?,
                None => proof.verify::<H>(&root),
            };
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "valid": valid,
                }),
            );
        }
    }

    Ok(())
}

fn build_tree<H: Hasher>(items: &[String]) -> anyhow::Result<MerkleTree<Bytes, H>> {
    let tree = MerkleTree::build(items.iter().map(|item| Bytes::from(item.as_str())))?;
    info!(
        hash = H::NAME,
        items = tree.len(),
        root = %tree.root_digest(),
        "built tree"
    );
    Ok(tree)
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", value);
        }
        OutputFormat::Text => {
            println!("{:#}", value);
        }
    }
}
