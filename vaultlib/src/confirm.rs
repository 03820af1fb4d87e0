// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Confirmation of a requested proxy by observing the factory's creation
//! event. The event log is eventually consistent and the RPC endpoint is
//! fallible, so observation runs under a bounded retry budget.

use crate::artifact::ContractArtifact;
use crate::client::{ChainClient, EventWindow, RawLog};
use crate::common::{Address, TxHash};
use crate::retry;
use alloy::json_abi::Event;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no creation event observed after {attempts} polling attempts")]
    Exhausted { attempts: u32 },
    #[error(transparent)]
    Artifact(#[from] crate::artifact::Error),
}

/// A creation record observed on-chain. Immutable fact once decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreationEvent {
    pub emitting_contract: Address,
    pub proxy: Address,
    pub block_number: Option<u64>,
}

/// Poll the factory's log for the named creation event until it shows up or
/// the attempt budget is spent. The transaction hash is carried for log
/// correlation only; the query itself is keyed by event topic and window.
#[allow(clippy::too_many_arguments)]
pub async fn await_proxy_creation<C: ChainClient>(
    client: &C,
    factory: Address,
    artifact: &ContractArtifact,
    event_name: &str,
    window: EventWindow,
    max_attempts: u32,
    delay: Duration,
    request_tx: TxHash,
) -> Result<CreationEvent, Error> {
    let event = artifact.event(event_name)?;
    let topic = event.selector();

    info!("waiting for {event_name} from factory {factory} (request tx {request_tx})");

    let observed = retry::poll_until(max_attempts, delay, event_name, || async move {
        let logs = client.logs(factory, topic, window).await?;
        Ok::<_, crate::client::Error>(select_latest(factory, event, &logs))
    })
    .await;

    match observed {
        Ok(creation) => {
            info!(
                "observed {event_name}: proxy {} (block {:?})",
                creation.proxy, creation.block_number
            );
            Ok(creation)
        }
        Err(exhausted) => Err(Error::Exhausted {
            attempts: exhausted.attempts,
        }),
    }
}

/// Pick the most recently emitted matching event: highest block number, and
/// the later log entry when several share a block.
fn select_latest(factory: Address, event: &Event, logs: &[RawLog]) -> Option<CreationEvent> {
    logs.iter()
        .filter_map(|log| decode_creation(factory, event, log))
        .max_by_key(|creation| creation.block_number.unwrap_or(0))
}

/// Decode one log entry against the event's ABI shape. Indexed params sit in
/// the topics, the rest in the data section as 32-byte words (the creation
/// event only carries statically encoded params). The proxy address is the
/// param named `proxy`, or the first address-typed param when none is.
fn decode_creation(factory: Address, event: &Event, log: &RawLog) -> Option<CreationEvent> {
    let mut topics = log.topics.iter();
    if *topics.next()? != event.selector() {
        return None;
    }

    let mut data_words = log.data.chunks(32);
    let mut named = None;
    let mut first = None;
    for param in &event.inputs {
        let word: [u8; 32] = if param.indexed {
            topics.next()?.0
        } else {
            data_words.next()?.try_into().ok()?
        };
        if param.ty == "address" {
            let address = Address::from_slice(&word[12..]);
            if param.name == "proxy" {
                named = Some(address);
            } else if first.is_none() {
                first = Some(address);
            }
        }
    }

    Some(CreationEvent {
        emitting_contract: factory,
        proxy: named.or(first)?,
        block_number: log.block_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Calldata, EventTopic};

    fn proxy_created_event() -> Event {
        let abi: alloy::json_abi::JsonAbi = serde_json::from_str(
            r#"[{
                "type": "event",
                "name": "ProxyCreated",
                "inputs": [
                    {"name":"merchant","type":"address","indexed":true,"internalType":"address"},
                    {"name":"proxy","type":"address","indexed":false,"internalType":"address"}
                ],
                "anonymous": false
            }]"#,
        )
        .expect("valid ABI");
        abi.event("ProxyCreated")
            .and_then(|events| events.first())
            .expect("event present")
            .clone()
    }

    fn word_of(address: Address) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(address.as_slice());
        word
    }

    fn log_of(event: &Event, merchant: Address, proxy: Address, block: u64) -> RawLog {
        RawLog {
            topics: vec![event.selector(), EventTopic::from(word_of(merchant))],
            data: Calldata::from(word_of(proxy).to_vec()),
            block_number: Some(block),
        }
    }

    #[test]
    fn decodes_the_proxy_param() {
        let event = proxy_created_event();
        let factory = Address::repeat_byte(0xFA);
        let merchant = Address::repeat_byte(0x01);
        let proxy = Address::repeat_byte(0x02);

        let creation = decode_creation(factory, &event, &log_of(&event, merchant, proxy, 7))
            .expect("decodable log");
        assert_eq!(
            creation,
            CreationEvent {
                emitting_contract: factory,
                proxy,
                block_number: Some(7),
            }
        );
    }

    #[test]
    fn ignores_logs_with_a_foreign_topic() {
        let event = proxy_created_event();
        let factory = Address::repeat_byte(0xFA);
        let mut log = log_of(&event, Address::repeat_byte(0x01), Address::repeat_byte(0x02), 7);
        log.topics[0] = EventTopic::repeat_byte(0xEE);
        assert_eq!(decode_creation(factory, &event, &log), None);
    }

    #[test]
    fn selects_the_most_recently_emitted_event() {
        let event = proxy_created_event();
        let factory = Address::repeat_byte(0xFA);
        let merchant = Address::repeat_byte(0x01);
        let logs = vec![
            log_of(&event, merchant, Address::repeat_byte(0x02), 5),
            log_of(&event, merchant, Address::repeat_byte(0x03), 9),
            log_of(&event, merchant, Address::repeat_byte(0x04), 7),
        ];

        let creation = select_latest(factory, &event, &logs).expect("matching events");
        assert_eq!(creation.proxy, Address::repeat_byte(0x03));
        assert_eq!(creation.block_number, Some(9));
    }

    #[test]
    fn later_log_wins_within_the_same_block() {
        let event = proxy_created_event();
        let factory = Address::repeat_byte(0xFA);
        let merchant = Address::repeat_byte(0x01);
        let logs = vec![
            log_of(&event, merchant, Address::repeat_byte(0x02), 9),
            log_of(&event, merchant, Address::repeat_byte(0x03), 9),
        ];

        let creation = select_latest(factory, &event, &logs).expect("matching events");
        assert_eq!(creation.proxy, Address::repeat_byte(0x03));
    }
}
