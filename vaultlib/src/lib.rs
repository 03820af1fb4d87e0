// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Provisioning of per-merchant payment-collection addresses.
//!
//! A shared `Vault` logic contract is deployed once, a `ProxyFactory` bound
//! to that vault is deployed next, and the factory is then asked to mint a
//! forwarding proxy for a merchant address. The proxy address is confirmed
//! by polling the factory's `ProxyCreated` event log.

#[macro_use]
extern crate tracing;

pub mod address;
pub mod artifact;
pub mod client;
pub mod common;
pub mod confirm;
pub mod preflight;
pub mod report;
mod retry;
pub mod sequencer;
pub mod transaction_config;

pub use alloy::transports::http::reqwest;

/// Timeout for watching submitted transactions.
pub(crate) const TX_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(24); // Should differ per chain
