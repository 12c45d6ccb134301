//! Stand-in used when no API key is set or `--offline` is passed.

use async_trait::async_trait;

use crate::core::element::ElementRecord;
use crate::lookup::{LookupError, LookupProvider};

#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredProvider;

#[async_trait]
impl LookupProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn fun_fact(&self, _element: &ElementRecord) -> Result<String, LookupError> {
        Err(LookupError::Config("no API key configured".to_string()))
    }

    async fn element_image(&self, _element: &ElementRecord) -> Result<String, LookupError> {
        Err(LookupError::Config("no API key configured".to_string()))
    }
}
