//! Speech: provider-agnostic text-to-speech.
//!
//! A [`Speaker`](speaker::Speaker) turns text into a stream of audio. Callers
//! hold the trait; the backend (vendor and API generation) is picked once,
//! when the session is built.
//!
//! # Quick Start
//!
//! ```no_run
//! use speech::prelude::*;
//!
//! # async fn example() -> speech::error::Result<()> {
//! let creds = Credentials::new("AKID", "secret");
//! let speaker: Box<dyn Speaker> =
//!     Box::new(PollyV2Speaker::new(&creds, "eu-west-2", "mp3", 22_050)?);
//! let spoken = speaker.speak("bonjour, comment ça va?", "medium", "fr-FR", "Lea").await?;
//! let audio = spoken.audio.read_to_end().await?;
//! println!("{} bytes of {}", audio.len(), spoken.format);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod polly;
pub mod prelude;
pub mod speaker;
pub mod util;
