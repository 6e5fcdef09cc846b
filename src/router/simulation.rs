//! Offline answers used when no credential is available.

use std::time::Duration;

const SDK_REPLY: &str = "[SIMULATION] For the NEXUS platform, I recommend using the C# Semantic Kernel SDK over Python. It offers better type safety for enterprise applications. \n\nFocus on the `Kernel.CreateBuilder()` pattern and ensure you implement `ITextGenerationService` correctly.";

const RAG_REPLY: &str = "[SIMULATION] Implementing RAG? Don't just dump text. You need a robust Chunking Strategy. \n\n1. Use Azure AI Search with Hybrid Retrieval (Vector + Keyword).\n2. Index your docs using the 'azure-search-openai-demo' scripts, but refactor the ingestion to an Azure Function.";

const MULTI_AGENT_REPLY: &str = "[SIMULATION] Multi-agent orchestration is complex. Start small. Use AutoGen for the 'Curriculum Design' module where one agent acts as the 'Teacher' and another as the 'Critic'. \n\nEnsure you have a 'GroupChatManager' to handle the conversation flow.";

const GENERAL_REPLY: &str = "[SIMULATION MODE] I am currently running without a live connection to the Gemini Architect. \n\nHowever, regarding your query: To build the NEXUS platform, focus on the C# Semantic Kernel SDK. It provides the strongest typing for Enterprise patterns compared to Python. Start by implementing the Kernel Memory for your RAG pipeline.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Sdk,
    Rag,
    MultiAgent,
    General,
}

impl Topic {
    /// First matching keyword group wins, in declaration order.
    pub fn classify(message: &str) -> Self {
        let msg = message.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| msg.contains(k));

        if mentions(&["semantic kernel", "sdk"]) {
            Topic::Sdk
        } else if mentions(&["rag", "search"]) {
            Topic::Rag
        } else if mentions(&["agent", "autogen"]) {
            Topic::MultiAgent
        } else {
            Topic::General
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            Topic::Sdk => SDK_REPLY,
            Topic::Rag => RAG_REPLY,
            Topic::MultiAgent => MULTI_AGENT_REPLY,
            Topic::General => GENERAL_REPLY,
        }
    }
}

pub(crate) async fn simulate(message: &str, delay: Duration) -> &'static str {
    tokio::time::sleep(delay).await;
    let topic = Topic::classify(message);
    tracing::debug!(?topic, "Answering from simulation");
    topic.reply()
}
