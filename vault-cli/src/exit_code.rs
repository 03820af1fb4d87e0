// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use color_eyre::eyre::Report;
use vaultlib::preflight::Error as PreflightError;
use vaultlib::sequencer::Error as DeployError;

pub(crate) type ExitCodeError = (Report, i32);

/// Missing or unusable configuration input (RPC URL, signing key).
pub(crate) const CONFIGURATION_ERROR: i32 = 2;
const ARTIFACT_ERROR: i32 = 3;
const INVALID_ADDRESS: i32 = 4;
const PREFLIGHT_ERROR: i32 = 5;
const VAULT_DEPLOY_ERROR: i32 = 6;
const FACTORY_DEPLOY_ERROR: i32 = 7;
const PROXY_REQUEST_ERROR: i32 = 8;
const CONFIRMATION_TIMEOUT: i32 = 9;
const NETWORK_ERROR: i32 = 13;

pub(crate) fn deploy_error_exit_code(err: &DeployError) -> i32 {
    match err {
        DeployError::Address(_) => INVALID_ADDRESS,
        DeployError::Artifact(_) => ARTIFACT_ERROR,
        DeployError::Preflight(PreflightError::InsufficientBalance { .. }) => PREFLIGHT_ERROR,
        DeployError::Preflight(PreflightError::Client(_)) => NETWORK_ERROR,
        DeployError::VaultDeploy(_) => VAULT_DEPLOY_ERROR,
        DeployError::FactoryDeploy(_) => FACTORY_DEPLOY_ERROR,
        DeployError::ProxyRequest(_) => PROXY_REQUEST_ERROR,
        DeployError::ConfirmationTimeout { .. } => CONFIRMATION_TIMEOUT,
    }
}
