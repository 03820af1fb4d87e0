// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use clap::Parser;
use std::path::PathBuf;
use vaultlib::reqwest::Url;

/// Environment variable consulted when `--rpc-url` is not given.
pub(crate) const RPC_URL_ENV: &str = "RPC_URL";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Opt {
    /// Merchant address the new proxy will forward funds to. Accepts
    /// 0x-prefixed hex, bare hex, or the 41-prefixed TRON hex form.
    pub merchant: String,

    /// HTTP RPC endpoint. Falls back to the RPC_URL environment variable.
    #[clap(long)]
    pub rpc_url: Option<Url>,

    /// Name of the environment variable holding the signing key.
    #[clap(long, default_value = "DEPLOYER_PRIVATE_KEY")]
    pub private_key_env: String,

    /// Directory holding the contract artifact JSON files.
    #[clap(long, default_value = "artifacts")]
    pub artifact_dir: PathBuf,

    /// Minimum native balance (in wei) required before any deployment is
    /// attempted. Falling short aborts the session.
    #[clap(long, default_value_t = 0)]
    pub min_balance: u128,

    /// Minimum execution-resource quota (gas units affordable at the current
    /// price). Falling short only warns.
    #[clap(long, default_value_t = 0)]
    pub min_resource: u128,

    /// Gas ceiling for the vault and factory deployments.
    #[clap(long)]
    pub deploy_gas_limit: Option<u64>,

    /// Gas ceiling for the proxy-creation call. Usually higher than the
    /// deployment ceiling since creation runs secondary contract logic.
    #[clap(long)]
    pub create_gas_limit: Option<u64>,

    /// Cap on the max fee per gas in wei; the market price is used when it
    /// sits below the cap.
    #[clap(long, conflicts_with = "max_fee_per_gas")]
    pub max_fee_cap: Option<u128>,

    /// Exact max fee per gas in wei.
    #[clap(long)]
    pub max_fee_per_gas: Option<u128>,

    /// Number of event-log polling attempts before the confirmation stage
    /// gives up.
    #[clap(long, default_value_t = 5)]
    pub confirm_attempts: u32,

    /// Seconds to wait between polling attempts.
    #[clap(long, default_value_t = 5)]
    pub confirm_delay_secs: u64,

    /// First block of the creation-event scan window.
    #[clap(long)]
    pub from_block: Option<u64>,

    /// Last block of the creation-event scan window.
    #[clap(long)]
    pub to_block: Option<u64>,

    /// Skip the best-effort vault owner() diagnostic.
    #[clap(long)]
    pub skip_owner_check: bool,
}
