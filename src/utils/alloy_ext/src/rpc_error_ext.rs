use alloy::transports::{RpcError, TransportErrorKind};

/// EIP-1193 "User Rejected Request".
pub const USER_REJECTED_REQUEST_CODE: i64 = 4001;

pub trait RpcErrorExt {
    /// The user declined the request in their wallet.
    fn is_user_rejection(&self) -> bool;

    /// No node or wallet is reachable behind the transport.
    fn is_backend_unavailable(&self) -> bool;
}

impl RpcErrorExt for RpcError<TransportErrorKind> {
    fn is_user_rejection(&self) -> bool {
        let RpcError::ErrorResp(resp) = self else {
            return false;
        };

        resp.code == USER_REJECTED_REQUEST_CODE || is_user_rejection_message(&resp.message)
    }

    fn is_backend_unavailable(&self) -> bool {
        match self {
            RpcError::Transport(
                TransportErrorKind::BackendGone | TransportErrorKind::PubsubUnavailable,
            ) => true,
            RpcError::Transport(TransportErrorKind::Custom(e)) => {
                is_connection_refused_message(&e.to_string())
            }
            _ => false,
        }
    }
}

fn is_user_rejection_message(message: &str) -> bool {
    let message = message.to_lowercase();

    // MetaMask, Frame, Rabby, WalletConnect
    ["user rejected", "user denied", "rejected by user", "user cancelled"]
        .iter()
        .any(|pattern| message.contains(pattern))
}

fn is_connection_refused_message(message: &str) -> bool {
    let message = message.to_lowercase();

    ["connection refused", "error sending request", "dns error"]
        .iter()
        .any(|pattern| message.contains(pattern))
}
