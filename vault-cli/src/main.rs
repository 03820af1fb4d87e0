// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod exit_code;
mod opt;

use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result};
use exit_code::ExitCodeError;
use opt::Opt;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vaultlib::artifact::ArtifactStore;
use vaultlib::client::{wallet_provider, EthereumWallet, EventWindow, PrivateKeySigner, RpcChainClient};
use vaultlib::common::Amount;
use vaultlib::preflight::Thresholds;
use vaultlib::report;
use vaultlib::reqwest::Url;
use vaultlib::sequencer::{Deployer, DeployerConfig};
use vaultlib::transaction_config::{MaxFeePerGas, TransactionConfig};

#[tokio::main]
async fn main() {
    color_eyre::install().unwrap_or_else(|err| eprintln!("Failed to install error handler: {err}"));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let opt = Opt::parse();
    if let Err((report, code)) = run(opt).await {
        eprintln!("Error: {report:?}");
        std::process::exit(code);
    }
}

async fn run(opt: Opt) -> Result<(), ExitCodeError> {
    let rpc_url = rpc_url(&opt).map_err(|err| (err, exit_code::CONFIGURATION_ERROR))?;
    let signer = signer(&opt).map_err(|err| (err, exit_code::CONFIGURATION_ERROR))?;
    let source_account = signer.address();

    let transaction_config = TransactionConfig {
        deploy_gas_limit: opt.deploy_gas_limit,
        create_gas_limit: opt.create_gas_limit,
        max_fee_per_gas: match (opt.max_fee_per_gas, opt.max_fee_cap) {
            (Some(exact), _) => MaxFeePerGas::Custom(exact),
            (None, Some(cap)) => MaxFeePerGas::LimitedAuto(cap),
            (None, None) => MaxFeePerGas::Auto,
        },
    };

    tracing::debug!("deploying from {source_account} via {rpc_url}");
    let provider = wallet_provider(rpc_url, EthereumWallet::from(signer));
    let client = RpcChainClient::new(provider, transaction_config);

    let config = DeployerConfig {
        source_account,
        thresholds: Thresholds {
            min_balance: Amount::from(opt.min_balance),
            min_resource: opt.min_resource,
        },
        event_window: EventWindow {
            from_block: opt.from_block,
            to_block: opt.to_block,
        },
        confirm_attempts: opt.confirm_attempts,
        confirm_delay: Duration::from_secs(opt.confirm_delay_secs),
        verify_owner: !opt.skip_owner_check,
    };

    let deployer = Deployer::new(client, ArtifactStore::new(&opt.artifact_dir), config);
    match deployer.run(&opt.merchant).await {
        Ok(outcome) => {
            outcome.announce();
            println!("{outcome}");
            Ok(())
        }
        Err(err) => {
            let code = exit_code::deploy_error_exit_code(&err);
            let stage = report::failure_stage(&err);
            Err((Report::new(err).wrap_err(format!("deployment failed during {stage}")), code))
        }
    }
}

fn rpc_url(opt: &Opt) -> Result<Url> {
    if let Some(url) = &opt.rpc_url {
        return Ok(url.clone());
    }
    let raw = std::env::var(opt::RPC_URL_ENV)
        .map_err(|_| eyre!("no RPC endpoint: pass --rpc-url or set {}", opt::RPC_URL_ENV))?;
    raw.parse()
        .map_err(|err| eyre!("invalid {} value {raw:?}: {err}", opt::RPC_URL_ENV))
}

fn signer(opt: &Opt) -> Result<PrivateKeySigner> {
    let key = std::env::var(&opt.private_key_env)
        .map_err(|_| eyre!("no signing key: set the {} environment variable", opt.private_key_env))?;
    key.trim()
        .parse()
        .map_err(|err| eyre!("invalid signing key in {}: {err}", opt.private_key_env))
}
