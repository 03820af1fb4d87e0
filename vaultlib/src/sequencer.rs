// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The deployment state machine: vault, then factory bound to the vault,
//! then the proxy-creation request, then confirmation.
//!
//! Stages are never retried here. Vault and factory deployment mutate
//! on-chain state at real cost; retrying an ambiguous failure risks paying
//! for duplicate contracts, so every stage either fully succeeds or fails
//! the whole session. The only retries live in the confirmation poller.

use crate::address;
use crate::artifact::{self, ArtifactStore, ContractArtifact};
use crate::client::{ChainClient, EventWindow};
use crate::common::{Address, TxHash};
use crate::confirm;
use crate::preflight::{self, Thresholds};
use crate::report::DeploymentReport;
use crate::{client, report};
use std::time::Duration;

pub(crate) const VAULT_CONTRACT: &str = "Vault";
pub(crate) const FACTORY_CONTRACT: &str = "ProxyFactory";
const CREATE_PROXY_FUNCTION: &str = "createProxy";
const PROXY_CREATED_EVENT: &str = "ProxyCreated";
const OWNER_FUNCTION: &str = "owner";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Address(#[from] address::Error),
    #[error(transparent)]
    Preflight(#[from] preflight::Error),
    #[error(transparent)]
    Artifact(#[from] artifact::Error),
    #[error("vault deployment failed: {0}")]
    VaultDeploy(#[source] client::Error),
    #[error("factory deployment failed: {0}")]
    FactoryDeploy(#[source] client::Error),
    #[error("proxy creation request failed: {0}")]
    ProxyRequest(#[source] client::Error),
    #[error(
        "proxy creation not confirmed after {attempts} polling attempts; \
         transaction {tx} may still land on-chain, re-query before re-submitting"
    )]
    ConfirmationTimeout { attempts: u32, tx: TxHash },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Idle,
    VaultDeployed,
    FactoryDeployed,
    ProxyRequested,
    ProxyConfirmed,
    Failed,
}

/// The one mutable entity of a deployment run. Created when the session
/// starts and discarded at a terminal stage.
#[derive(Debug)]
pub struct DeploymentSession {
    stage: Stage,
    vault_address: Option<Address>,
    factory_address: Option<Address>,
    proxy_request_tx: Option<TxHash>,
    confirmed_proxy: Option<Address>,
}

impl DeploymentSession {
    fn new() -> Self {
        Self {
            stage: Stage::Idle,
            vault_address: None,
            factory_address: None,
            proxy_request_tx: None,
            confirmed_proxy: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn vault_address(&self) -> Option<Address> {
        self.vault_address
    }

    pub fn factory_address(&self) -> Option<Address> {
        self.factory_address
    }

    pub fn proxy_request_tx(&self) -> Option<TxHash> {
        self.proxy_request_tx
    }

    pub fn confirmed_proxy(&self) -> Option<Address> {
        self.confirmed_proxy
    }

    fn record_vault(&mut self, vault: Address) {
        debug_assert_eq!(self.stage, Stage::Idle);
        self.vault_address = Some(vault);
        self.stage = Stage::VaultDeployed;
    }

    fn record_factory(&mut self, factory: Address) {
        debug_assert_eq!(self.stage, Stage::VaultDeployed);
        self.factory_address = Some(factory);
        self.stage = Stage::FactoryDeployed;
    }

    fn record_proxy_request(&mut self, tx: TxHash) {
        debug_assert_eq!(self.stage, Stage::FactoryDeployed);
        self.proxy_request_tx = Some(tx);
        self.stage = Stage::ProxyRequested;
    }

    fn record_confirmed(&mut self, proxy: Address) {
        debug_assert_eq!(self.stage, Stage::ProxyRequested);
        self.confirmed_proxy = Some(proxy);
        self.stage = Stage::ProxyConfirmed;
    }

    fn fail(&mut self) {
        self.stage = Stage::Failed;
    }
}

#[derive(Clone, Debug)]
pub struct DeployerConfig {
    /// The account funding the deployments.
    pub source_account: Address,
    pub thresholds: Thresholds,
    /// Block range scanned for the creation event.
    pub event_window: EventWindow,
    /// Polling budget for the confirmation stage.
    pub confirm_attempts: u32,
    pub confirm_delay: Duration,
    /// Run the best-effort vault `owner()` diagnostic after deployment.
    pub verify_owner: bool,
}

/// Orchestrates one deployment session at a time. Concurrent sessions must
/// use separate deployers; session state is never shared.
pub struct Deployer<C: ChainClient> {
    client: C,
    artifacts: ArtifactStore,
    config: DeployerConfig,
}

impl<C: ChainClient> Deployer<C> {
    pub fn new(client: C, artifacts: ArtifactStore, config: DeployerConfig) -> Self {
        Self {
            client,
            artifacts,
            config,
        }
    }

    /// Run a full deployment session for the given merchant address and
    /// return the confirmed proxy.
    pub async fn run(&self, merchant: &str) -> Result<DeploymentReport, Error> {
        let merchant = address::normalize(merchant)?;
        let canonical = address::canonical(merchant);
        if !address::is_canonical(&canonical) {
            return Err(address::Error::InvalidAddress(canonical).into());
        }
        info!("starting deployment session for merchant {canonical}");

        // Gate on funds before anything is loaded or submitted.
        preflight::check(&self.client, self.config.source_account, &self.config.thresholds)
            .await?;

        let mut session = DeploymentSession::new();
        match self.advance(&mut session, merchant).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                session.fail();
                error!(
                    "deployment session failed during {}: {err}",
                    report::failure_stage(&err)
                );
                Err(err)
            }
        }
    }

    async fn advance(
        &self,
        session: &mut DeploymentSession,
        merchant: Address,
    ) -> Result<DeploymentReport, Error> {
        // Idle -> VaultDeployed
        let vault_artifact = self.artifacts.load(VAULT_CONTRACT)?;
        let vault = self
            .client
            .deploy(vault_artifact.deploy_code(None)?)
            .await
            .map_err(Error::VaultDeploy)?;
        session.record_vault(vault);
        info!("vault deployed at {}", address::canonical(vault));

        if self.config.verify_owner {
            self.verify_vault_owner(&vault_artifact, vault).await;
        }

        // VaultDeployed -> FactoryDeployed. The factory is bound to the
        // vault recorded above and nothing else; every proxy it mints
        // forwards through that vault.
        let factory_artifact = self.artifacts.load(FACTORY_CONTRACT)?;
        let factory = self
            .client
            .deploy(factory_artifact.deploy_code(Some(vault))?)
            .await
            .map_err(Error::FactoryDeploy)?;
        session.record_factory(factory);
        info!("proxy factory deployed at {}", address::canonical(factory));

        // FactoryDeployed -> ProxyRequested
        let calldata = factory_artifact.call_data(CREATE_PROXY_FUNCTION, merchant)?;
        let tx = self
            .client
            .send_call(factory, calldata)
            .await
            .map_err(Error::ProxyRequest)?;
        session.record_proxy_request(tx);
        info!("proxy creation requested, tx {tx}");

        // ProxyRequested -> ProxyConfirmed
        let creation = confirm::await_proxy_creation(
            &self.client,
            factory,
            &factory_artifact,
            PROXY_CREATED_EVENT,
            self.config.event_window,
            self.config.confirm_attempts,
            self.config.confirm_delay,
            tx,
        )
        .await
        .map_err(|err| match err {
            confirm::Error::Exhausted { attempts } => Error::ConfirmationTimeout { attempts, tx },
            confirm::Error::Artifact(err) => Error::Artifact(err),
        })?;
        session.record_confirmed(creation.proxy);

        Ok(DeploymentReport {
            merchant,
            vault,
            factory,
            proxy: creation.proxy,
            request_tx: tx,
        })
    }

    /// Best-effort diagnostic: some vault variants expose `owner()`, and a
    /// mismatch is worth a warning. Never gates progression.
    async fn verify_vault_owner(&self, artifact: &ContractArtifact, vault: Address) {
        let calldata = match artifact.view_call_data(OWNER_FUNCTION) {
            Ok(calldata) => calldata,
            Err(err) => {
                debug!("vault ABI exposes no {OWNER_FUNCTION}(): {err}");
                return;
            }
        };

        match self.client.call_view(vault, calldata).await {
            Ok(ret) if ret.len() >= 32 => {
                let owner = Address::from_slice(&ret[12..32]);
                if owner == self.config.source_account {
                    debug!("vault owner verified: {owner}");
                } else {
                    warn!(
                        "vault owner {owner} differs from the deploying account {}",
                        self.config.source_account
                    );
                }
            }
            Ok(ret) => warn!("unexpected {OWNER_FUNCTION}() return of {} bytes", ret.len()),
            Err(err) => warn!("could not verify vault owner (ignored): {err}"),
        }
    }
}
