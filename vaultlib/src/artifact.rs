// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Loading and validation of compiled contract artifacts.
//!
//! One JSON document per contract, holding the `abi` and the deployable
//! `bytecode`. A missing or invalid artifact is a build-time defect, so
//! nothing here retries.

use crate::common::{Address, Calldata};
use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{Event, JsonAbi};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no artifact found for contract {0}")]
    NotFound(String),
    #[error("artifact for {name} is malformed: {reason}")]
    Malformed { name: String, reason: String },
    #[error("artifact for {0} has an empty ABI")]
    EmptyAbi(String),
    #[error("artifact for {0} has no deployable bytecode")]
    EmptyBytecode(String),
    #[error("artifact for {name} has no {entry} in its ABI")]
    MissingAbiEntry { name: String, entry: String },
    #[error("ABI encoding failed: {0}")]
    Encode(#[from] alloy::dyn_abi::Error),
}

#[derive(Deserialize)]
struct ArtifactFile {
    abi: JsonAbi,
    bytecode: String,
}

/// A validated contract artifact. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: JsonAbi,
    pub bytecode: Calldata,
}

impl ContractArtifact {
    /// The init code for deploying this contract: the bytecode, followed by
    /// the ABI-encoded constructor argument when one is given. Passing an
    /// argument requires a single-parameter constructor in the ABI.
    pub fn deploy_code(&self, constructor_arg: Option<Address>) -> Result<Calldata, Error> {
        let mut code = self.bytecode.to_vec();
        if let Some(arg) = constructor_arg {
            let constructor = self
                .abi
                .constructor
                .as_ref()
                .filter(|c| c.inputs.len() == 1)
                .ok_or_else(|| Error::MissingAbiEntry {
                    name: self.name.clone(),
                    entry: "single-argument constructor".to_string(),
                })?;
            code.extend(constructor.abi_encode_input_raw(&[DynSolValue::Address(arg)])?);
        }
        Ok(code.into())
    }

    /// Calldata for invoking the named single-address-argument function.
    pub fn call_data(&self, function: &str, arg: Address) -> Result<Calldata, Error> {
        let function = self.function(function)?;
        Ok(function
            .abi_encode_input(&[DynSolValue::Address(arg)])?
            .into())
    }

    /// Calldata for invoking the named zero-argument function.
    pub fn view_call_data(&self, function: &str) -> Result<Calldata, Error> {
        let function = self.function(function)?;
        Ok(function.abi_encode_input(&[])?.into())
    }

    /// Resolve the named event from the ABI.
    pub fn event(&self, name: &str) -> Result<&Event, Error> {
        self.abi
            .event(name)
            .and_then(|events| events.first())
            .ok_or_else(|| Error::MissingAbiEntry {
                name: self.name.clone(),
                entry: format!("event {name}"),
            })
    }

    fn function(&self, name: &str) -> Result<&alloy::json_abi::Function, Error> {
        self.abi
            .function(name)
            .and_then(|functions| functions.first())
            .ok_or_else(|| Error::MissingAbiEntry {
                name: self.name.clone(),
                entry: format!("function {name}"),
            })
    }
}

/// Reads artifacts from a directory of `<ContractName>.json` files.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load and validate the named contract's artifact.
    pub fn load(&self, name: &str) -> Result<ContractArtifact, Error> {
        let path = self.dir.join(format!("{name}.json"));
        let raw = std::fs::read_to_string(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(name.to_string())
            } else {
                Error::Malformed {
                    name: name.to_string(),
                    reason: err.to_string(),
                }
            }
        })?;

        let file: ArtifactFile = serde_json::from_str(&raw).map_err(|err| Error::Malformed {
            name: name.to_string(),
            reason: err.to_string(),
        })?;

        if file.abi.is_empty() {
            return Err(Error::EmptyAbi(name.to_string()));
        }

        // "0x" with nothing behind it is an empty placeholder, not bytecode.
        let hex_body = file.bytecode.trim();
        let hex_body = hex_body.strip_prefix("0x").unwrap_or(hex_body);
        if hex_body.is_empty() {
            return Err(Error::EmptyBytecode(name.to_string()));
        }
        let bytecode = alloy::hex::decode(hex_body).map_err(|err| Error::Malformed {
            name: name.to_string(),
            reason: format!("bytecode is not hex: {err}"),
        })?;

        debug!(
            "loaded artifact {name}: {} ABI entries, {} bytecode bytes",
            file.abi.len(),
            bytecode.len()
        );

        Ok(ContractArtifact {
            name: name.to_string(),
            abi: file.abi,
            bytecode: bytecode.into(),
        })
    }
}
