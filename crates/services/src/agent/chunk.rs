use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RunChunk {
    data: Vec<ChunkMessage>,
}

#[derive(Debug, Deserialize)]
struct ChunkMessage {
    content: String,
    #[serde(rename = "type")]
    kind: ChunkKind,
}

#[derive(Debug, Deserialize)]
enum ChunkKind {
    #[serde(rename = "ai")]
    Ai,
}

/// Text of the first AI message in a streamed chunk.
///
/// Returns `None` unless `data` is a non-empty array whose every entry is
/// `{ content: string, type: "ai" }`. Other fields are ignored.
#[must_use]
pub fn partial_text(chunk: &Value) -> Option<String> {
    let parsed = RunChunk::deserialize(chunk).ok()?;
    parsed.data.into_iter().next().map(|message| {
        let ChunkKind::Ai = message.kind;
        message.content
    })
}
