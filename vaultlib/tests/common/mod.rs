#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vaultlib::client::{Account, ChainClient, Error, EventWindow, RawLog};
use vaultlib::common::{Address, Amount, Calldata, EventTopic, TxHash};
use vaultlib::preflight::Thresholds;
use vaultlib::sequencer::DeployerConfig;
use std::path::Path;
use std::time::Duration;

pub const VAULT_ARTIFACT_JSON: &str = r#"{
    "abi": [
        {"type":"function","name":"owner","inputs":[],"outputs":[{"name":"","type":"address","internalType":"address"}],"stateMutability":"view"}
    ],
    "bytecode": "0x6080604052"
}"#;

pub const FACTORY_ARTIFACT_JSON: &str = r#"{
    "abi": [
        {"type":"constructor","inputs":[{"name":"_vault","type":"address","internalType":"address"}],"stateMutability":"nonpayable"},
        {"type":"function","name":"createProxy","inputs":[{"name":"merchant","type":"address","internalType":"address"}],"outputs":[{"name":"proxy","type":"address","internalType":"address"}],"stateMutability":"nonpayable"},
        {"type":"event","name":"ProxyCreated","inputs":[{"name":"merchant","type":"address","indexed":true,"internalType":"address"},{"name":"proxy","type":"address","indexed":false,"internalType":"address"}],"anonymous":false}
    ],
    "bytecode": "0x60806040deadbeef"
}"#;

pub const REQUEST_TX: TxHash = TxHash::repeat_byte(0xAB);

pub fn write_artifacts(dir: &Path) {
    std::fs::write(dir.join("Vault.json"), VAULT_ARTIFACT_JSON).expect("write Vault.json");
    std::fs::write(dir.join("ProxyFactory.json"), FACTORY_ARTIFACT_JSON)
        .expect("write ProxyFactory.json");
}

pub fn config(source_account: Address) -> DeployerConfig {
    DeployerConfig {
        source_account,
        thresholds: Thresholds {
            min_balance: Amount::from(1u8),
            min_resource: 0,
        },
        event_window: EventWindow::default(),
        confirm_attempts: 3,
        confirm_delay: Duration::from_millis(10),
        verify_owner: false,
    }
}

fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// A `ProxyCreated(address indexed merchant, address proxy)` log entry.
pub fn creation_log(topic: EventTopic, merchant: Address, proxy: Address, block: u64) -> RawLog {
    RawLog {
        topics: vec![topic, EventTopic::from(address_word(merchant))],
        data: Calldata::from(address_word(proxy).to_vec()),
        block_number: Some(block),
    }
}

pub enum LogBatch {
    Logs(Vec<RawLog>),
    NetworkError,
}

#[derive(Default)]
struct MockState {
    balance: Amount,
    resource_quota: u128,
    owner: Option<Address>,
    deploy_addresses: Mutex<VecDeque<Address>>,
    deployed_code: Mutex<Vec<Calldata>>,
    sent_calls: Mutex<Vec<(Address, Calldata)>>,
    log_batches: Mutex<VecDeque<LogBatch>>,
    snapshot_calls: AtomicUsize,
    deploy_calls: AtomicUsize,
    log_queries: AtomicUsize,
    view_calls: AtomicUsize,
}

/// A scripted chain: deployments pop pre-arranged addresses, log queries pop
/// pre-arranged batches (empty once the script runs out), and every
/// interaction is recorded for assertions.
#[derive(Clone)]
pub struct MockChain(Arc<MockState>);

impl MockChain {
    pub fn new(balance: Amount, resource_quota: u128) -> Self {
        Self(Arc::new(MockState {
            balance,
            resource_quota,
            ..Default::default()
        }))
    }

    pub fn with_owner(balance: Amount, resource_quota: u128, owner: Address) -> Self {
        Self(Arc::new(MockState {
            balance,
            resource_quota,
            owner: Some(owner),
            ..Default::default()
        }))
    }

    pub fn script_deploys(&self, addresses: &[Address]) {
        self.0
            .deploy_addresses
            .lock()
            .expect("poisoned")
            .extend(addresses.iter().copied());
    }

    pub fn script_log_batch(&self, batch: LogBatch) {
        self.0.log_batches.lock().expect("poisoned").push_back(batch);
    }

    pub fn deployed_code(&self) -> Vec<Calldata> {
        self.0.deployed_code.lock().expect("poisoned").clone()
    }

    pub fn sent_calls(&self) -> Vec<(Address, Calldata)> {
        self.0.sent_calls.lock().expect("poisoned").clone()
    }

    pub fn deploy_calls(&self) -> usize {
        self.0.deploy_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot_calls(&self) -> usize {
        self.0.snapshot_calls.load(Ordering::SeqCst)
    }

    pub fn log_queries(&self) -> usize {
        self.0.log_queries.load(Ordering::SeqCst)
    }

    pub fn view_calls(&self) -> usize {
        self.0.view_calls.load(Ordering::SeqCst)
    }
}

impl ChainClient for MockChain {
    async fn account_snapshot(&self, address: Address) -> Result<Account, Error> {
        self.0.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Account {
            address,
            balance: self.0.balance,
            resource_quota: self.0.resource_quota,
        })
    }

    async fn deploy(&self, init_code: Calldata) -> Result<Address, Error> {
        self.0.deploy_calls.fetch_add(1, Ordering::SeqCst);
        self.0
            .deployed_code
            .lock()
            .expect("poisoned")
            .push(init_code);
        self.0
            .deploy_addresses
            .lock()
            .expect("poisoned")
            .pop_front()
            .ok_or_else(|| Error::Rpc("no scripted deployment address".to_string()))
    }

    async fn send_call(&self, to: Address, calldata: Calldata) -> Result<TxHash, Error> {
        self.0
            .sent_calls
            .lock()
            .expect("poisoned")
            .push((to, calldata));
        Ok(REQUEST_TX)
    }

    async fn logs(
        &self,
        _source: Address,
        _topic: EventTopic,
        _window: EventWindow,
    ) -> Result<Vec<RawLog>, Error> {
        self.0.log_queries.fetch_add(1, Ordering::SeqCst);
        match self.0.log_batches.lock().expect("poisoned").pop_front() {
            Some(LogBatch::Logs(logs)) => Ok(logs),
            Some(LogBatch::NetworkError) => Err(Error::Rpc("simulated outage".to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn call_view(&self, _to: Address, _calldata: Calldata) -> Result<Calldata, Error> {
        self.0.view_calls.fetch_add(1, Ordering::SeqCst);
        match self.0.owner {
            Some(owner) => Ok(Calldata::from(address_word(owner).to_vec())),
            None => Err(Error::Rpc("execution reverted".to_string())),
        }
    }
}
