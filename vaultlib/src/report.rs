// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Presentation of the session outcome. No retries, no side effects beyond
//! reporting.

use crate::address;
use crate::common::{Address, TxHash};
use crate::sequencer::Error;
use std::fmt;

/// Final outcome of a confirmed deployment session.
#[derive(Clone, Copy, Debug)]
pub struct DeploymentReport {
    pub merchant: Address,
    pub vault: Address,
    pub factory: Address,
    pub proxy: Address,
    pub request_tx: TxHash,
}

impl DeploymentReport {
    /// Emit the stage summary and the final collection-address line.
    pub fn announce(&self) {
        info!("vault:         {}", address::canonical(self.vault));
        info!("proxy factory: {}", address::canonical(self.factory));
        info!("creation tx:   {}", self.request_tx);
        info!(
            "collection address {} is live, forwarding to merchant {}",
            address::canonical(self.proxy),
            address::canonical(self.merchant)
        );
    }
}

impl fmt::Display for DeploymentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "proxy {} confirmed for merchant {} (vault {}, factory {}, tx {})",
            address::canonical(self.proxy),
            address::canonical(self.merchant),
            address::canonical(self.vault),
            address::canonical(self.factory),
            self.request_tx
        )
    }
}

/// The stage a failed session died in, for operator-facing output.
pub fn failure_stage(err: &Error) -> &'static str {
    match err {
        Error::Address(_) => "address normalization",
        Error::Preflight(_) => "preflight",
        Error::Artifact(_) => "artifact load",
        Error::VaultDeploy(_) => "vault deployment",
        Error::FactoryDeploy(_) => "factory deployment",
        Error::ProxyRequest(_) => "proxy creation request",
        Error::ConfirmationTimeout { .. } => "proxy confirmation",
    }
}
