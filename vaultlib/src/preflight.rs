// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Resource checks that gate entry into the deployment sequence.
//!
//! Deployments cost real funds and are irreversible once submitted, so a
//! doomed sequence is cheapest to stop here, before anything is spent.

use crate::client::{Account, ChainClient};
use crate::common::{Address, Amount};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },
    #[error(transparent)]
    Client(#[from] crate::client::Error),
}

#[derive(Clone, Copy, Debug)]
pub struct Thresholds {
    /// Minimum native balance required to attempt the sequence. Fatal when
    /// not met.
    pub min_balance: Amount,
    /// Minimum execution-resource quota. A shortfall only warns: the
    /// deployment proceeds, but contract execution may fail downstream.
    pub min_resource: u128,
}

/// Snapshot the account and decide whether deployment may start.
pub async fn check<C: ChainClient>(
    client: &C,
    address: Address,
    thresholds: &Thresholds,
) -> Result<Account, Error> {
    let account = client.account_snapshot(address).await?;

    if account.balance < thresholds.min_balance {
        return Err(Error::InsufficientBalance {
            have: account.balance,
            need: thresholds.min_balance,
        });
    }

    if account.resource_quota < thresholds.min_resource {
        warn!(
            "account {address} has {} resource units, below the recommended {}; execution may fail downstream",
            account.resource_quota, thresholds.min_resource
        );
    } else {
        debug!(
            "preflight passed for {address}: balance {}, resource quota {}",
            account.balance, account.resource_quota
        );
    }

    Ok(account)
}
