//! HTTP gateway implementation of the contract seam.
//!
//! Talks to a JSON indexer/gateway that fronts the deployed contract. The
//! gateway owns the ABI encoding and event decoding; this client only maps
//! JSON bodies onto core types.

use crate::{ChainResult, ElectionContract, EventRecord};
use async_trait::async_trait;
use chrono::DateTime;
use psephos_core::{Candidate, ElectionInfo, VoteReceipt, VoteReceiptBuilder, VoterHash};
use psephos_error::{ChainError, ChainErrorKind};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Client for a JSON contract gateway.
#[derive(Debug, Clone)]
pub struct HttpContract {
    client: Client,
    base_url: String,
    contract_address: String,
}

impl HttpContract {
    /// Creates a new gateway client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Gateway base URL, without a trailing slash
    /// * `contract_address` - Address of the deployed voting contract
    pub fn new(base_url: impl Into<String>, contract_address: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let contract_address = contract_address.into();
        debug!(%base_url, %contract_address, "Creating new contract gateway client");
        Self {
            client: Client::new(),
            base_url,
            contract_address,
        }
    }

    /// The address of the contract this client fronts.
    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/contracts/{}/{}",
            self.base_url, self.contract_address, path
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ChainResult<T> {
        let url = self.url(path);
        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(%url, error = ?e, "Gateway request failed");
            ChainError::new(ChainErrorKind::Rpc(format!("request failed: {e}")))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%url, status = %status, body = %body, "Gateway returned error");
            return Err(ChainError::new(ChainErrorKind::Gateway {
                status: status.as_u16(),
                message: body,
            }));
        }

        response.json().await.map_err(|e| {
            error!(%url, error = ?e, "Failed to parse gateway response");
            ChainError::new(ChainErrorKind::Decode(e.to_string()))
        })
    }
}

#[derive(Debug, Deserialize)]
struct NextIdBody {
    next_id: u64,
}

#[derive(Debug, Deserialize)]
struct ElectionInfoBody {
    name: String,
    start_time: i64,
    end_time: i64,
    active: bool,
    candidate_count: u32,
}

// The gateway reports candidates the way the contract does: parallel arrays.
#[derive(Debug, Deserialize)]
struct CandidatesBody {
    names: Vec<String>,
    parties: Vec<String>,
    vote_counts: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct TotalVotesBody {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct HasVotedBody {
    has_voted: bool,
}

#[derive(Debug, Serialize)]
struct CastVoteBody<'a> {
    candidate_index: u32,
    voter_hash: &'a str,
}

#[derive(Debug, Deserialize)]
struct ReceiptBody {
    transaction_hash: String,
    from: Option<String>,
    to: Option<String>,
    block_number: Option<u64>,
    reverted: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdminBody {
    admin_address: String,
}

#[derive(Debug, Deserialize)]
struct LatestBlockBody {
    block_number: u64,
}

#[derive(Debug, Deserialize)]
struct EventBody {
    transaction_hash: String,
    block_number: u64,
    timestamp: i64,
    from: String,
    confirmed: bool,
}

fn parse_timestamp(secs: i64) -> ChainResult<chrono::DateTime<chrono::Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        ChainError::new(ChainErrorKind::Decode(format!(
            "timestamp {secs} out of range"
        )))
    })
}

fn convert_event(body: EventBody) -> ChainResult<EventRecord> {
    let timestamp = parse_timestamp(body.timestamp)?;
    Ok(EventRecord::new(
        body.transaction_hash,
        body.block_number,
        timestamp,
        body.from,
        body.confirmed,
    ))
}

#[async_trait]
impl ElectionContract for HttpContract {
    #[instrument(skip(self))]
    async fn next_election_id(&self) -> ChainResult<u64> {
        let body: NextIdBody = self.get_json("next-election-id").await.map_err(|e| {
            ChainError::new(ChainErrorKind::CounterUnreadable(e.to_string()))
        })?;
        debug!(next_id = body.next_id, "Read election id counter");
        Ok(body.next_id)
    }

    #[instrument(skip(self))]
    async fn election_info(&self, election_id: u64) -> ChainResult<ElectionInfo> {
        let result: ChainResult<ElectionInfoBody> =
            self.get_json(&format!("elections/{election_id}")).await;
        let body = match result {
            Ok(body) => body,
            Err(e) => {
                if let ChainErrorKind::Gateway { status, .. } = &e.kind
                    && *status == StatusCode::NOT_FOUND.as_u16()
                {
                    return Err(ChainError::new(ChainErrorKind::NoSuchElection(election_id)));
                }
                return Err(e);
            }
        };

        Ok(ElectionInfo::new(
            body.name,
            parse_timestamp(body.start_time)?,
            parse_timestamp(body.end_time)?,
            body.active,
            body.candidate_count,
        ))
    }

    #[instrument(skip(self))]
    async fn candidates(&self, election_id: u64) -> ChainResult<Vec<Candidate>> {
        let body: CandidatesBody = self
            .get_json(&format!("elections/{election_id}/candidates"))
            .await?;

        if body.names.len() != body.parties.len() || body.names.len() != body.vote_counts.len() {
            return Err(ChainError::new(ChainErrorKind::Decode(
                "candidate arrays have mismatched lengths".to_string(),
            )));
        }

        let candidates = body
            .names
            .into_iter()
            .zip(body.parties)
            .zip(body.vote_counts)
            .enumerate()
            .map(|(i, ((name, party), votes))| Candidate::new(name, party, votes, i as u32))
            .collect();
        Ok(candidates)
    }

    #[instrument(skip(self))]
    async fn total_votes(&self, election_id: u64) -> ChainResult<u64> {
        let body: TotalVotesBody = self
            .get_json(&format!("elections/{election_id}/total-votes"))
            .await?;
        Ok(body.total)
    }

    #[instrument(skip(self, voter))]
    async fn has_voted(&self, election_id: u64, voter: &VoterHash) -> ChainResult<bool> {
        let body: HasVotedBody = self
            .get_json(&format!(
                "elections/{election_id}/voters/{}",
                voter.to_hex()
            ))
            .await?;
        Ok(body.has_voted)
    }

    #[instrument(skip(self, voter))]
    async fn cast_vote(
        &self,
        election_id: u64,
        candidate_index: u32,
        voter: &VoterHash,
    ) -> ChainResult<VoteReceipt> {
        let url = self.url(&format!("elections/{election_id}/votes"));
        let voter_hash = voter.to_hex();
        debug!(election_id, candidate_index, "Submitting vote transaction");

        let response = self
            .client
            .post(&url)
            .json(&CastVoteBody {
                candidate_index,
                voter_hash: &voter_hash,
            })
            .send()
            .await
            .map_err(|e| {
                error!(%url, error = ?e, "Vote submission failed");
                ChainError::new(ChainErrorKind::Rpc(format!("request failed: {e}")))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%url, status = %status, body = %body, "Vote submission rejected");
            return Err(ChainError::new(ChainErrorKind::Gateway {
                status: status.as_u16(),
                message: body,
            }));
        }

        let body: ReceiptBody = response.json().await.map_err(|e| {
            error!(%url, error = ?e, "Failed to parse vote receipt");
            ChainError::new(ChainErrorKind::Decode(e.to_string()))
        })?;

        if let Some(reason) = body.reverted {
            return Err(ChainError::new(ChainErrorKind::Revert(reason)));
        }

        debug!(hash = %body.transaction_hash, "Vote transaction confirmed");
        VoteReceiptBuilder::default()
            .transaction_hash(body.transaction_hash)
            .election_id(election_id)
            .from(body.from)
            .to(body.to)
            .block_number(body.block_number)
            .build()
            .map_err(|e| ChainError::new(ChainErrorKind::Decode(e.to_string())))
    }

    #[instrument(skip(self))]
    async fn admin_address(&self) -> ChainResult<String> {
        let body: AdminBody = self.get_json("admin").await?;
        Ok(body.admin_address)
    }

    #[instrument(skip(self))]
    async fn latest_block(&self) -> ChainResult<u64> {
        let body: LatestBlockBody = self.get_json("blocks/latest").await?;
        Ok(body.block_number)
    }

    #[instrument(skip(self))]
    async fn election_created_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        let bodies: Vec<EventBody> = self
            .get_json(&format!(
                "events/election-created?from={from_block}&to={to_block}"
            ))
            .await?;
        bodies.into_iter().map(convert_event).collect()
    }

    #[instrument(skip(self))]
    async fn vote_cast_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        let bodies: Vec<EventBody> = self
            .get_json(&format!("events/vote-cast?from={from_block}&to={to_block}"))
            .await?;
        bodies.into_iter().map(convert_event).collect()
    }
}
