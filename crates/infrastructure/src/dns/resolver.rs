use super::cache::{CacheKey, RecordCache};
use super::roots::{pick_root, ROOT_SERVERS};
use super::transport::{Protocol, UpstreamExchange};
use burrow_dns_domain::wire::{decode_message, encode_message};
use burrow_dns_domain::{
    DnsError, Message, MessageRole, RData, RecordClass, RecordType, ResourceRecord,
};
use std::collections::HashMap;
use std::future::Future;
use std::net::Ipv4Addr;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info};

/// Iterative resolver: starts at a random root, follows referrals until a
/// nameserver answers, and feeds everything it learns into the shared
/// record cache.
pub struct RecursiveResolver {
    cache: Arc<RecordCache>,
    exchange: Arc<dyn UpstreamExchange>,
    roots: Vec<Ipv4Addr>,
}

impl RecursiveResolver {
    pub fn new(cache: Arc<RecordCache>, exchange: Arc<dyn UpstreamExchange>) -> Self {
        Self {
            cache,
            exchange,
            roots: ROOT_SERVERS.to_vec(),
        }
    }

    /// Replaces the compiled-in root hints (tests point this at a
    /// scripted upstream).
    pub fn with_roots(mut self, roots: Vec<Ipv4Addr>) -> Self {
        self.roots = roots;
        self
    }

    /// Serves a decoded client query: resolves every question and builds
    /// one reply carrying the concatenated answers.
    pub async fn resolve_query(&self, request: &Message) -> Result<Message, DnsError> {
        let mut answers = Vec::new();
        for question in &request.questions {
            let records = self
                .resolve(&question.qname, question.qtype, question.qclass)
                .await?;
            answers.extend(records);
        }
        Ok(Message::answer_for(request, answers))
    }

    pub async fn resolve(
        &self,
        domain: &str,
        qtype: RecordType,
        qclass: RecordClass,
    ) -> Result<Vec<ResourceRecord>, DnsError> {
        self.resolve_inner(domain, qtype, qclass).await
    }

    // Glueless referrals resolve nameserver hostnames through the same
    // entry point, so the future has to be boxed.
    fn resolve_inner<'a>(
        &'a self,
        domain: &'a str,
        qtype: RecordType,
        qclass: RecordClass,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ResourceRecord>, DnsError>> + Send + 'a>> {
        Box::pin(async move {
            let key = CacheKey::new(domain, qtype, qclass);
            let cached = self.cache.get(&key);
            if !cached.is_empty() {
                debug!(domain, qtype = %qtype, records = cached.len(), "cache hit");
                return Ok(cached);
            }

            let mut nameserver = pick_root(&self.roots);
            loop {
                let response = self
                    .query_nameserver(domain, qtype, qclass, nameserver)
                    .await?;

                if !response.answers.is_empty() {
                    for record in response
                        .answers
                        .iter()
                        .chain(&response.authorities)
                        .chain(&response.additionals)
                    {
                        self.cache.insert(domain, record.clone());
                    }
                    info!(
                        domain,
                        qtype = %qtype,
                        answers = response.answers.len(),
                        server = %nameserver,
                        "resolved"
                    );
                    return Ok(response.answers);
                }

                nameserver = self.referral_nameserver(&response).await?;
            }
        })
    }

    /// One question/answer exchange with a nameserver: UDP first, and a
    /// single TCP retry against the same server when the response came
    /// back truncated. A truncated TCP response is a dead end.
    async fn query_nameserver(
        &self,
        domain: &str,
        qtype: RecordType,
        qclass: RecordClass,
        nameserver: Ipv4Addr,
    ) -> Result<Message, DnsError> {
        let query = Message::query(fastrand::u16(..), domain, qtype, qclass);
        let wire = encode_message(&query)?;

        debug!(domain, server = %nameserver, "querying nameserver");
        let raw = self
            .exchange
            .exchange(&wire, nameserver, Protocol::Udp)
            .await?;
        let mut response = decode_message(&raw, MessageRole::Response)?;

        if response.header.tc() {
            debug!(server = %nameserver, "response truncated, retrying over TCP");
            let raw = self
                .exchange
                .exchange(&wire, nameserver, Protocol::Tcp)
                .await?;
            response = decode_message(&raw, MessageRole::Response)?;
            if response.header.tc() {
                return Err(DnsError::TruncatedTcpResponse);
            }
        }
        Ok(response)
    }

    /// Picks the next nameserver from a referral. NS records in the
    /// authority section name the candidates; A records in the additional
    /// section supply glue for them. Any glued candidate wins outright;
    /// otherwise the candidates are resolved themselves, first success
    /// taken. Glue and resolved addresses are picked at random when
    /// several are on offer.
    async fn referral_nameserver(&self, response: &Message) -> Result<Ipv4Addr, DnsError> {
        let mut candidates: HashMap<String, Option<Ipv4Addr>> = HashMap::new();
        for record in &response.authorities {
            if let RData::NS(host) = &record.rdata {
                candidates.entry(host.clone()).or_insert(None);
            }
        }
        for record in &response.additionals {
            if let RData::A(addr) = &record.rdata {
                candidates.insert(record.name.clone(), Some(*addr));
            }
        }

        let glued: Vec<Ipv4Addr> = candidates.values().filter_map(|v| *v).collect();
        if !glued.is_empty() {
            return Ok(glued[fastrand::usize(..glued.len())]);
        }

        for (host, _) in candidates.iter().filter(|(_, glue)| glue.is_none()) {
            match self
                .resolve_inner(host, RecordType::A, RecordClass::IN)
                .await
            {
                Ok(records) => {
                    let addresses: Vec<Ipv4Addr> = records
                        .iter()
                        .filter_map(|record| match &record.rdata {
                            RData::A(addr) => Some(*addr),
                            _ => None,
                        })
                        .collect();
                    if !addresses.is_empty() {
                        return Ok(addresses[fastrand::usize(..addresses.len())]);
                    }
                }
                Err(error) => {
                    debug!(authority = %host, %error, "failed to resolve authority");
                }
            }
        }
        Err(DnsError::NoAuthority)
    }
}
