use alloy::primitives::B256;
use alloy::rpc::types::Log;

pub trait LogExt {
    /// `None` for anonymous events, which carry no signature topic.
    fn event_signature_hash(&self) -> Option<B256>;
}

impl LogExt for Log {
    #[inline]
    fn event_signature_hash(&self) -> Option<B256> {
        self.topics().first().copied()
    }
}
