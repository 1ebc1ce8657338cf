//! Machine translation providers for lingobridge
//!
//! The proxy endpoint forwards every request to a [`MachineTranslator`]. In
//! production that is [`MyMemoryProvider`]; tests use [`MockTranslator`].
//!
//! # Example
//!
//! ```ignore
//! use lingobridge_mt::{MachineTranslator, MyMemoryProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MyMemoryProvider::from_env()?;
//!     let translation = provider.translate("Hello", Some("en"), "es").await?;
//!     println!("{} ({})", translation.text, provider.provider_name());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mock;
pub mod mymemory;
pub mod translator;


// Re-export main types for convenient access
pub use error::{MtError, MtResult};
pub use mock::{MockMode, MockTranslator};
pub use mymemory::MyMemoryProvider;
pub use translator::{
    MachineTranslator, Translation, language_pair, source_for_upstream, validate_locale,
};
