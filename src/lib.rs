//! voicevars - Dynamic variable resolution for voice-agent prompts
//!
//! Greetings and system prompts are written as templates with `{name}`
//! placeholders. voicevars fills them from a per-user JSON profile store and
//! leaves anything it cannot fill as literal text, so a live call never aborts
//! over a data-quality problem.

pub mod error;
pub mod observer;
pub mod profile;
pub mod session;
pub mod variables;

pub use error::{ProfileError, Result, VoiceVarsError};
pub use observer::{LogObserver, NullObserver, ResolveObserver};
pub use profile::{DEFAULT_PROFILE_PATH, ProfileRecord, ProfileStore};
pub use session::{Participant, SessionBootstrap, SessionPrompts, SessionSettings};
pub use variables::{PlaceholderExtractor, VariableHandler, VariableMode, VariableValue};
