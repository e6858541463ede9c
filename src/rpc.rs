//! JSON-RPC access to a NEAR node: the two queries and the one submission
//! the actions need.

use std::time::Duration;

use async_trait::async_trait;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use tracing::debug;

use crate::defaults::Defaults;
use crate::error::ExecError;
use crate::key::PublicKey;
use crate::types::{AccessKeyList, AccessKeyView, FinalExecutionOutcome};

#[async_trait]
pub trait NearRpc: Send + Sync {
    /// Nonce and a recent block hash for one access key
    async fn view_access_key(
        &self,
        account_id: &str,
        public_key: &PublicKey,
    ) -> Result<AccessKeyView, ExecError>;

    async fn view_access_key_list(&self, account_id: &str) -> Result<AccessKeyList, ExecError>;

    /// Submit and wait until the transaction's final outcome is known
    async fn broadcast_tx_commit(
        &self,
        signed_tx_base64: &str,
    ) -> Result<FinalExecutionOutcome, ExecError>;
}

pub struct JsonRpcProvider {
    client: HttpClient,
}

impl JsonRpcProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ExecError> {
        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(url)?;
        Ok(JsonRpcProvider { client })
    }

    fn query_params(request_type: &str, account_id: &str) -> Result<ObjectParams, ExecError> {
        let mut params = ObjectParams::new();
        params.insert("request_type", request_type)?;
        params.insert("finality", Defaults::FINALITY)?;
        params.insert("account_id", account_id)?;
        Ok(params)
    }
}

#[async_trait]
impl NearRpc for JsonRpcProvider {
    async fn view_access_key(
        &self,
        account_id: &str,
        public_key: &PublicKey,
    ) -> Result<AccessKeyView, ExecError> {
        let mut params = Self::query_params("view_access_key", account_id)?;
        params.insert("public_key", public_key.to_string())?;
        debug!(account_id, %public_key, "query view_access_key");

        let view: AccessKeyView = self.client.request("query", params).await?;
        if let Some(err) = view.error {
            return Err(ExecError::Query(err));
        }
        Ok(view)
    }

    async fn view_access_key_list(&self, account_id: &str) -> Result<AccessKeyList, ExecError> {
        let params = Self::query_params("view_access_key_list", account_id)?;
        debug!(account_id, "query view_access_key_list");

        let list: AccessKeyList = self.client.request("query", params).await?;
        if let Some(err) = list.error {
            return Err(ExecError::Query(err));
        }
        Ok(list)
    }

    async fn broadcast_tx_commit(
        &self,
        signed_tx_base64: &str,
    ) -> Result<FinalExecutionOutcome, ExecError> {
        debug!(len = signed_tx_base64.len(), "broadcast_tx_commit");
        Ok(self
            .client
            .request("broadcast_tx_commit", rpc_params![signed_tx_base64])
            .await?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum RpcCall {
        ViewAccessKey { account_id: String, public_key: String },
        ViewAccessKeyList { account_id: String },
        Broadcast { signed_tx_base64: String },
    }

    /// Records every call and answers from canned values
    pub(crate) struct MockRpc {
        pub nonce: u64,
        pub block_hash: [u8; 32],
        /// `kind` of an ActionError to report from the broadcast, success when `None`
        pub failure_kind: Option<serde_json::Value>,
        pub query_error: Option<String>,
        /// Raw `status` JSON returned by broadcast, wins over `failure_kind`
        pub status: Option<serde_json::Value>,
        pub calls: Mutex<Vec<RpcCall>>,
    }

    impl Default for MockRpc {
        fn default() -> Self {
            MockRpc {
                nonce: 5,
                block_hash: [4u8; 32],
                failure_kind: None,
                query_error: None,
                status: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl MockRpc {
        pub(crate) fn calls(&self) -> Vec<RpcCall> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn broadcasts(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    RpcCall::Broadcast { signed_tx_base64 } => Some(signed_tx_base64),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl NearRpc for MockRpc {
        async fn view_access_key(
            &self,
            account_id: &str,
            public_key: &PublicKey,
        ) -> Result<AccessKeyView, ExecError> {
            self.calls.lock().unwrap().push(RpcCall::ViewAccessKey {
                account_id: account_id.to_string(),
                public_key: public_key.to_string(),
            });
            if let Some(err) = &self.query_error {
                return Err(ExecError::Query(err.clone()));
            }
            Ok(serde_json::from_value(json!({
                "nonce": self.nonce,
                "permission": "FullAccess",
                "block_height": 100,
                "block_hash": bs58::encode(self.block_hash).into_string(),
            }))?)
        }

        async fn view_access_key_list(
            &self,
            account_id: &str,
        ) -> Result<AccessKeyList, ExecError> {
            self.calls.lock().unwrap().push(RpcCall::ViewAccessKeyList {
                account_id: account_id.to_string(),
            });
            Ok(serde_json::from_value(json!({
                "block_hash": "x",
                "block_height": 100,
                "keys": [
                    {"public_key": "ed25519:FullKey", "access_key": {"nonce": 7, "permission": "FullAccess"}}
                ]
            }))?)
        }

        async fn broadcast_tx_commit(
            &self,
            signed_tx_base64: &str,
        ) -> Result<FinalExecutionOutcome, ExecError> {
            self.calls.lock().unwrap().push(RpcCall::Broadcast {
                signed_tx_base64: signed_tx_base64.to_string(),
            });
            let status = match (&self.status, &self.failure_kind) {
                (Some(status), _) => status.clone(),
                (None, Some(kind)) => json!({"Failure": {"ActionError": {"index": 0, "kind": kind}}}),
                (None, None) => json!({"SuccessValue": ""}),
            };
            Ok(serde_json::from_value(json!({
                "status": status,
                "transaction": {"hash": "HashOfTx"},
            }))?)
        }
    }

    #[test]
    fn query_params_name_finality_and_account() {
        let params = JsonRpcProvider::query_params("view_access_key_list", "alice.testnet").unwrap();
        let raw = jsonrpsee::core::traits::ToRpcParams::to_rpc_params(params)
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(raw.get()).unwrap();
        assert_eq!(
            value,
            json!({
                "request_type": "view_access_key_list",
                "finality": "final",
                "account_id": "alice.testnet",
            })
        );
    }
}
