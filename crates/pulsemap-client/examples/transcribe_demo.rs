// Standalone transcription demo, disconnected from the map runtime:
// uploads a WAV file to the speech backend and prints the transcript.
//
// Usage: cargo run --example transcribe_demo -- path/to/clip.wav
// Set PULSEMAP_API_URL to point at a backend.

use pulsemap_client::TranscriptionClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: transcribe_demo <audio.wav>")?;
    let base_url = std::env::var("PULSEMAP_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api".to_string());

    let audio = std::fs::read(&path)?;
    println!("uploading {} ({} bytes)...", path, audio.len());

    let client = TranscriptionClient::with_base_url(base_url);
    let transcript = client.transcribe("audiofile", audio).await?;
    println!("transcript: {transcript}");

    Ok(())
}
