//! Infallible lookup entry points.
//!
//! ```text
//! Err(Config)   → not-configured fallback
//! Err(NoImage)  → grayscale placeholder (image only)
//! Err(_)        → error fallback
//! ```

use log::{info, warn};

use crate::core::element::ElementRecord;
use crate::lookup::{LookupError, LookupProvider};

pub const FUN_FACT_NOT_CONFIGURED: &str = "API Key not configured.";
pub const FUN_FACT_FALLBACK: &str = "Could not load fun fact at this time.";
pub const IMAGE_NOT_CONFIGURED: &str = "https://picsum.photos/512";
pub const IMAGE_FALLBACK: &str = "https://picsum.photos/512/512";
pub const IMAGE_NO_IMAGE_PART: &str = "https://picsum.photos/512/512?grayscale";

pub async fn get_fun_fact(provider: &dyn LookupProvider, element: &ElementRecord) -> String {
    match provider.fun_fact(element).await {
        Ok(fact) => {
            info!("Fun fact loaded for {} via {}", element.symbol, provider.name());
            fact
        }
        Err(LookupError::Config(msg)) => {
            info!("Fun fact skipped for {}: {msg}", element.symbol);
            FUN_FACT_NOT_CONFIGURED.to_string()
        }
        Err(e) => {
            warn!("Error fetching fun fact for {}: {e}", element.symbol);
            FUN_FACT_FALLBACK.to_string()
        }
    }
}

pub async fn get_element_image(provider: &dyn LookupProvider, element: &ElementRecord) -> String {
    match provider.element_image(element).await {
        Ok(uri) => {
            info!("Image loaded for {} via {}", element.symbol, provider.name());
            uri
        }
        Err(LookupError::Config(msg)) => {
            info!("Image skipped for {}: {msg}", element.symbol);
            IMAGE_NOT_CONFIGURED.to_string()
        }
        Err(LookupError::NoImage) => {
            warn!("No image part returned for {}", element.symbol);
            IMAGE_NO_IMAGE_PART.to_string()
        }
        Err(e) => {
            warn!("Error generating image for {}: {e}", element.symbol);
            IMAGE_FALLBACK.to_string()
        }
    }
}
