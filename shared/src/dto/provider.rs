use serde::{Deserialize, Serialize};

/// JSON-RPC methods the connector sends to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcMethod {
    /// Prompts the user to authorize accounts
    #[serde(rename = "eth_requestAccounts")]
    RequestAccounts,
    /// Reads already-authorized accounts without prompting
    #[serde(rename = "eth_accounts")]
    Accounts,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::RequestAccounts => "eth_requestAccounts",
            RpcMethod::Accounts => "eth_accounts",
        }
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Argument object passed to the provider's `request()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestArguments {
    pub method: RpcMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<serde_json::Value>>,
}

impl RequestArguments {
    pub fn new(method: RpcMethod) -> Self {
        Self {
            method,
            params: None,
        }
    }
}

/// Error object thrown by a provider request (EIP-1193 `ProviderRpcError`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorPayload {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl RpcErrorPayload {
    /// EIP-1193: the user rejected the request
    pub const USER_REJECTED: i64 = 4001;

    pub fn is_user_rejection(&self) -> bool {
        self.code == Self::USER_REJECTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_arguments_wire_format() {
        let args = RequestArguments::new(RpcMethod::RequestAccounts);
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            serde_json::json!({ "method": "eth_requestAccounts" })
        );
    }

    #[test]
    fn test_method_names_match_serde() {
        for method in [RpcMethod::RequestAccounts, RpcMethod::Accounts] {
            let json = serde_json::to_value(method).unwrap();
            assert_eq!(json.as_str(), Some(method.as_str()));
        }
    }

    #[test]
    fn test_rpc_error_payload_from_provider() {
        let payload: RpcErrorPayload = serde_json::from_value(serde_json::json!({
            "code": 4001,
            "message": "User rejected the request.",
            "stack": "Error: ..."
        }))
        .unwrap();
        assert!(payload.is_user_rejection());
        assert_eq!(payload.message, "User rejected the request.");

        let pending: RpcErrorPayload =
            serde_json::from_value(serde_json::json!({ "code": -32002 })).unwrap();
        assert!(!pending.is_user_rejection());
        assert!(pending.message.is_empty());
    }
}
