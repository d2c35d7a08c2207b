use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use knowledge_flow::adk::agent::LLMAgent;
use knowledge_flow::adk::embedder::openai::OpenAIEmbedder;
use knowledge_flow::adk::model::openai::OpenAIModel;
use knowledge_flow::adk::model::Model;
use knowledge_flow::kb::config::{OpenAiSettings, Settings};
use knowledge_flow::kb::ingest::{load_and_chunk, TextSplitter};
use knowledge_flow::kb::server::{self, AppState};
use knowledge_flow::kb::store::VectorStore;
use knowledge_flow::kb::workflow::graph::WorkflowGraph;

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional YAML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Text files to index before running the command
    #[arg(short, long, global = true)]
    docs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question
    Ask {
        /// The question to answer
        #[arg(short, long)]
        question: String,
    },
    /// Serve the upload and query API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    let openai = OpenAiSettings::from_env();
    log::info!(
        "Using chat model {} and embedding model {} at {}",
        settings.chat_model,
        settings.embedding_model,
        openai.base_url
    );

    let embedder = OpenAIEmbedder::new(&openai, settings.embedding_model.clone())?;
    let store = VectorStore::new(Arc::new(embedder));
    let splitter = TextSplitter::new(settings.chunk_size, settings.chunk_overlap)?;

    for path in &args.docs {
        let chunks = load_and_chunk(path, &splitter)
            .with_context(|| format!("failed to load {}", path.display()))?;
        log::info!("Indexing {} chunks from {}", chunks.len(), path.display());
        store.add(chunks).await.map_err(|e| anyhow!(e))?;
    }

    let model: Arc<dyn Model> = Arc::new(OpenAIModel::new(&openai, settings.chat_model.clone())?);
    let reasoner = LLMAgent::new("reasoner".to_string(), String::new(), model.clone());
    let summarizer = LLMAgent::new("summarizer".to_string(), String::new(), model);

    let graph = WorkflowGraph::new(
        Arc::new(store.clone()),
        Arc::new(reasoner),
        Arc::new(summarizer),
        settings.retrieval_params()?,
    );

    match args.command {
        Commands::Ask { question } => {
            let outcome = graph.run_workflow(&question).await.map_err(|e| anyhow!(e))?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Serve { port } => {
            let state = AppState {
                graph: Arc::new(graph),
                store,
                splitter,
            };
            server::serve(state, port).await.map_err(|e| anyhow!(e))?;
        }
    }

    Ok(())
}
