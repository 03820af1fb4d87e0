// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The chain capability seam: what the deployment workflow needs from an
//! RPC endpoint, and the alloy-backed production implementation.

use crate::common::{Address, Amount, Calldata, EventTopic, TxHash};
use crate::transaction_config::{MaxFeePerGas, TransactionConfig};
use crate::TX_TIMEOUT;
use alloy::network::TransactionBuilder;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::Filter;
use alloy::transports::http::reqwest;

pub use alloy::network::EthereumWallet;
pub use alloy::signers::local::PrivateKeySigner;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("transport error: {0}")]
    Transport(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("pending transaction error: {0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("deployment receipt for {0} carries no contract address")]
    NoContractAddress(TxHash),
}

/// Read-only snapshot of the deploying account, taken once during preflight.
#[derive(Clone, Copy, Debug)]
pub struct Account {
    pub address: Address,
    pub balance: Amount,
    /// Execution-resource allowance. On EVM chains this is the number of
    /// gas units affordable at the current gas price; there is no separate
    /// energy ledger to query.
    pub resource_quota: u128,
}

/// Block range scanned for creation events. Left unset, the scan covers the
/// whole chain up to the latest block.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventWindow {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
}

/// An observed log entry, before typed decoding.
#[derive(Clone, Debug)]
pub struct RawLog {
    pub topics: Vec<EventTopic>,
    pub data: Calldata,
    pub block_number: Option<u64>,
}

/// Everything the deployment workflow asks of the chain.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    async fn account_snapshot(&self, address: Address) -> Result<Account, Error>;

    /// Submit a contract deployment and wait for it to land. The returned
    /// address comes from the inclusion receipt.
    async fn deploy(&self, init_code: Calldata) -> Result<Address, Error>;

    /// Submit a state-mutating contract call and wait for inclusion.
    async fn send_call(&self, to: Address, calldata: Calldata) -> Result<TxHash, Error>;

    /// Query the event log of `source` for entries with the given topic.
    async fn logs(
        &self,
        source: Address,
        topic: EventTopic,
        window: EventWindow,
    ) -> Result<Vec<RawLog>, Error>;

    /// Execute a read-only call.
    async fn call_view(&self, to: Address, calldata: Calldata) -> Result<Calldata, Error>;
}

/// Build an HTTP provider with the given wallet attached, with the standard
/// gas/nonce/chain-id fillers.
pub fn wallet_provider(rpc_url: reqwest::Url, wallet: EthereumWallet) -> impl Provider + Clone {
    ProviderBuilder::new().wallet(wallet).connect_http(rpc_url)
}

/// [`ChainClient`] over an alloy provider.
#[derive(Clone, Debug)]
pub struct RpcChainClient<P: Provider> {
    provider: P,
    config: TransactionConfig,
}

impl<P: Provider> RpcChainClient<P> {
    pub fn new(provider: P, config: TransactionConfig) -> Self {
        Self { provider, config }
    }

    async fn resolved_max_fee(&self) -> Result<Option<u128>, Error> {
        match self.config.max_fee_per_gas {
            MaxFeePerGas::Auto => Ok(None),
            MaxFeePerGas::Custom(limit) => Ok(Some(limit)),
            MaxFeePerGas::LimitedAuto(cap) => {
                let market = self.provider.get_gas_price().await?;
                Ok(Some(market.min(cap)))
            }
        }
    }
}

impl<P: Provider> ChainClient for RpcChainClient<P> {
    async fn account_snapshot(&self, address: Address) -> Result<Account, Error> {
        let balance = self.provider.get_balance(address).await?;
        let gas_price = self.provider.get_gas_price().await?;
        let resource_quota = if gas_price == 0 {
            u128::MAX
        } else {
            (balance / Amount::from(gas_price)).saturating_to()
        };
        Ok(Account {
            address,
            balance,
            resource_quota,
        })
    }

    async fn deploy(&self, init_code: Calldata) -> Result<Address, Error> {
        let mut tx = self
            .provider
            .transaction_request()
            .with_deploy_code(init_code);
        if let Some(gas) = self.config.deploy_gas_limit {
            tx = tx.with_gas_limit(gas);
        }
        if let Some(max_fee) = self.resolved_max_fee().await? {
            tx = tx.with_max_fee_per_gas(max_fee);
        }

        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .inspect_err(|err| error!("Error sending deployment transaction: {err:?}"))?
            .with_timeout(Some(TX_TIMEOUT))
            .get_receipt()
            .await?;

        if !receipt.status() {
            return Err(Error::Reverted(receipt.transaction_hash));
        }
        receipt
            .contract_address
            .ok_or(Error::NoContractAddress(receipt.transaction_hash))
    }

    async fn send_call(&self, to: Address, calldata: Calldata) -> Result<TxHash, Error> {
        let mut tx = self
            .provider
            .transaction_request()
            .with_to(to)
            .with_input(calldata);
        if let Some(gas) = self.config.create_gas_limit {
            tx = tx.with_gas_limit(gas);
        }
        if let Some(max_fee) = self.resolved_max_fee().await? {
            tx = tx.with_max_fee_per_gas(max_fee);
        }

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .inspect_err(|err| error!("Error sending contract call: {err:?}"))?
            .with_timeout(Some(TX_TIMEOUT));

        debug!("contract call is pending with tx hash: {:?}", pending.tx_hash());

        let tx_hash = pending
            .watch()
            .await
            .inspect_err(|err| error!("Error watching contract call: {err:?}"))?;

        Ok(tx_hash)
    }

    async fn logs(
        &self,
        source: Address,
        topic: EventTopic,
        window: EventWindow,
    ) -> Result<Vec<RawLog>, Error> {
        let mut filter = Filter::new()
            .address(source)
            .event_signature(topic)
            .from_block(window.from_block.unwrap_or(0));
        if let Some(to_block) = window.to_block {
            filter = filter.to_block(to_block);
        }

        let logs = self.provider.get_logs(&filter).await?;
        Ok(logs
            .into_iter()
            .map(|log| RawLog {
                topics: log.inner.data.topics().to_vec(),
                data: log.inner.data.data.clone(),
                block_number: log.block_number,
            })
            .collect())
    }

    async fn call_view(&self, to: Address, calldata: Calldata) -> Result<Calldata, Error> {
        let tx = self
            .provider
            .transaction_request()
            .with_to(to)
            .with_input(calldata);
        Ok(self.provider.call(tx).await?)
    }
}
