use crate::domain::model::Message;
use crate::utils::error::Result;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Destination for UI push events. One call per accepted record.
pub trait Sink {
    fn emit(&mut self, channel: &str, payload: &Value, origin: &Message) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, channel: &str, payload: &Value, origin: &Message) -> Result<()> {
        (**self).emit(channel, payload, origin)
    }
}
