//! Group label generation.
//!
//! A group's label is a short decorative string. It comes either from a
//! deterministic local heuristic over the members' shared attributes, or —
//! when `SHOEBOX_NAMER_URL` is set — from an external text-generation
//! collaborator. The collaborator is a black box that may fail or time out;
//! every failure mode degrades to [`FALLBACK_LABEL`], never to an error the
//! UI would have to display.

use crate::catalog::MementoInfo;
use crate::types::{Group, GroupId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

/// Label used whenever no better name is available.
pub const FALLBACK_LABEL: &str = "Group";

/// Environment variable naming the HTTP label collaborator endpoint.
pub const NAMER_URL_ENV: &str = "SHOEBOX_NAMER_URL";

/// How long the HTTP collaborator may take before we fall back.
const NAMER_TIMEOUT: Duration = Duration::from_secs(4);

/// Strategy for naming a group of mementos.
pub trait GroupNamer: Send + Sync {
    /// Produces a label for the given members. Implementations never fail:
    /// anything that goes wrong resolves to [`FALLBACK_LABEL`].
    fn name_group(&self, items: &[&'static MementoInfo]) -> String;
}

/// Deterministic namer based on attributes the members share.
///
/// Mirrors the common-attribute analysis the archive page performs locally:
/// a single shared city, type, or year produces a themed label; otherwise a
/// generic collection name.
#[derive(Debug, Default)]
pub struct HeuristicNamer;

impl HeuristicNamer {
    fn unique<'a>(items: &[&'a MementoInfo], f: impl Fn(&'a MementoInfo) -> &'a str) -> Vec<&'a str> {
        let mut values: Vec<&str> = Vec::new();
        for &item in items {
            let v = f(item);
            if !v.is_empty() && !values.contains(&v) {
                values.push(v);
            }
        }
        values
    }
}

impl GroupNamer for HeuristicNamer {
    fn name_group(&self, items: &[&'static MementoInfo]) -> String {
        if items.is_empty() {
            return FALLBACK_LABEL.to_string();
        }

        let cities = Self::unique(items, |i| i.city);
        let types = Self::unique(items, |i| i.item_type);
        let years = Self::unique(items, |i| i.year);

        // "Berkeley, CA" -> "Berkeley"
        let short_city = |city: &str| city.split(',').next().unwrap_or(city).trim().to_string();

        match (cities.as_slice(), types.as_slice(), years.as_slice()) {
            ([city], [kind], _) => format!("{} finds from {}", kind, short_city(city)),
            ([city], _, [year]) => format!("{} in {}", year, short_city(city)),
            ([city], _, _) => format!("Keepsakes from {}", short_city(city)),
            (_, [kind], _) => format!("{} collection", kind),
            (_, _, [year]) => format!("Memories of {year}"),
            _ => "Mixed collection".to_string(),
        }
    }
}

#[derive(Serialize)]
struct LabelRequestItem<'a> {
    city: &'a str,
    year: &'a str,
    #[serde(rename = "type")]
    item_type: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LabelRequest<'a> {
    items: Vec<LabelRequestItem<'a>>,
}

#[derive(Deserialize)]
struct LabelResponse {
    #[serde(rename = "groupName")]
    group_name: String,
}

/// Namer backed by the external text-generation collaborator.
///
/// Sends `POST { items: [{ city, year, type, name }] }` and expects
/// `{ "groupName": string }`. Network errors, non-2xx statuses, timeouts and
/// malformed bodies all map to [`FALLBACK_LABEL`].
pub struct HttpNamer {
    endpoint: String,
    client: Option<reqwest::blocking::Client>,
}

impl HttpNamer {
    /// Creates a namer for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(NAMER_TIMEOUT)
            .build()
            .map_err(|err| log::warn!("label client unavailable: {err}"))
            .ok();
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    fn request(&self, items: &[&'static MementoInfo]) -> Option<String> {
        let client = self.client.as_ref()?;
        let body = LabelRequest {
            items: items
                .iter()
                .map(|i| LabelRequestItem {
                    city: i.city,
                    year: i.year,
                    item_type: i.item_type,
                    name: i.name,
                })
                .collect(),
        };

        let response = client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|err| log::warn!("label request failed: {err}"))
            .ok()?;
        if !response.status().is_success() {
            log::warn!("label collaborator returned {}", response.status());
            return None;
        }
        let parsed: LabelResponse = response
            .json()
            .map_err(|err| log::warn!("label response malformed: {err}"))
            .ok()?;
        let name = parsed.group_name.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.to_string())
    }
}

impl GroupNamer for HttpNamer {
    fn name_group(&self, items: &[&'static MementoInfo]) -> String {
        if items.is_empty() {
            return FALLBACK_LABEL.to_string();
        }
        self.request(items)
            .unwrap_or_else(|| FALLBACK_LABEL.to_string())
    }
}

/// Picks the namer from the environment: the HTTP collaborator when
/// [`NAMER_URL_ENV`] is set, the local heuristic otherwise.
pub fn namer_from_env() -> Arc<dyn GroupNamer> {
    match std::env::var(NAMER_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => {
            log::info!("using label collaborator at {url}");
            Arc::new(HttpNamer::new(url))
        }
        _ => Arc::new(HeuristicNamer),
    }
}

/// Fire-and-forget label generation with per-group caching.
///
/// Requests run on short-lived worker threads and report back over an mpsc
/// channel; results are applied when drained on the UI thread, and only if
/// the group id still exists in the cache's view of the world (results for
/// vanished groups are simply dropped on read).
pub struct LabelWorker {
    namer: Arc<dyn GroupNamer>,
    sender: Sender<(GroupId, String)>,
    receiver: Receiver<(GroupId, String)>,
    cache: HashMap<GroupId, String>,
    pending: HashSet<GroupId>,
}

impl LabelWorker {
    /// Creates a worker using the given naming strategy.
    pub fn new(namer: Arc<dyn GroupNamer>) -> Self {
        let (sender, receiver) = channel();
        Self {
            namer,
            sender,
            receiver,
            cache: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    /// Requests a label for the group unless one is cached or in flight.
    pub fn request(&mut self, group: &Group, members: Vec<&'static MementoInfo>) {
        if self.cache.contains_key(&group.id) || !self.pending.insert(group.id) {
            return;
        }
        let namer = Arc::clone(&self.namer);
        let sender = self.sender.clone();
        let id = group.id;
        std::thread::spawn(move || {
            let label = namer.name_group(&members);
            // The UI may have shut down; a dead channel is fine.
            let _ = sender.send((id, label));
        });
    }

    /// Moves completed results into the cache. Call once per frame.
    pub fn drain(&mut self) {
        while let Ok((id, label)) = self.receiver.try_recv() {
            self.pending.remove(&id);
            self.cache.insert(id, label);
        }
    }

    /// The label to display for a group right now. Unresolved groups show
    /// the fallback label.
    pub fn label_for(&self, id: GroupId) -> &str {
        self.cache.get(&id).map(String::as_str).unwrap_or(FALLBACK_LABEL)
    }

    /// Drops cached labels for groups that no longer exist, keeping the
    /// cache bounded across a long session.
    pub fn retain_groups(&mut self, live: &HashSet<GroupId>) {
        self.cache.retain(|id, _| live.contains(id));
        self.pending.retain(|id| live.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn infos(kinds: &[&str]) -> Vec<&'static MementoInfo> {
        kinds.iter().map(|k| catalog::lookup(k).unwrap()).collect()
    }

    #[test]
    fn heuristic_empty_group_falls_back() {
        assert_eq!(HeuristicNamer.name_group(&[]), FALLBACK_LABEL);
    }

    #[test]
    fn heuristic_shared_city_and_type() {
        // berkeley + fournee share the city but not the type.
        let label = HeuristicNamer.name_group(&infos(&["berkeley", "fournee"]));
        assert_eq!(label, "Keepsakes from Berkeley");

        // carbone + daytrip + dishoom share only the type.
        let label = HeuristicNamer.name_group(&infos(&["carbone", "daytrip", "dishoom"]));
        assert_eq!(label, "Restaurant card collection");
    }

    #[test]
    fn heuristic_shared_year() {
        // bigsur (2022) + cat (2022): different city and type, same year.
        let label = HeuristicNamer.name_group(&infos(&["bigsur", "cat"]));
        assert_eq!(label, "Memories of 2022");
    }

    #[test]
    fn heuristic_mixed_group() {
        let label = HeuristicNamer.name_group(&infos(&["carbone", "bigsur", "gudetama"]));
        assert_eq!(label, "Mixed collection");
    }

    #[test]
    fn heuristic_is_deterministic() {
        let members = infos(&["berkeley", "calpig"]);
        assert_eq!(
            HeuristicNamer.name_group(&members),
            HeuristicNamer.name_group(&members)
        );
    }

    #[test]
    fn http_failure_degrades_to_fallback() {
        // Nothing listens here; the connection is refused immediately.
        let namer = HttpNamer::new("http://127.0.0.1:1/generate-group-name");
        let label = namer.name_group(&infos(&["carbone"]));
        assert_eq!(label, FALLBACK_LABEL);
    }

    /// Serves exactly one connection with a canned HTTP response.
    fn serve_once(response: &'static str) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/generate-group-name")
    }

    #[test]
    fn http_500_degrades_to_fallback() {
        let endpoint = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let namer = HttpNamer::new(endpoint);
        assert_eq!(namer.name_group(&infos(&["carbone"])), FALLBACK_LABEL);
    }

    #[test]
    fn http_malformed_body_degrades_to_fallback() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 14\r\nConnection: close\r\n\r\n{\"wrong\":true}",
        );
        let namer = HttpNamer::new(endpoint);
        assert_eq!(namer.name_group(&infos(&["carbone"])), FALLBACK_LABEL);
    }

    #[test]
    fn worker_resolves_labels_through_channel() {
        use crate::clustering::cluster;
        use crate::types::Item;

        let items = vec![
            Item::new(1, "berkeley", 0.0, 0.0),
            Item::new(2, "fournee", 50.0, 0.0),
        ];
        let groups = cluster(&items, 80.0);
        let group = &groups[0];

        let mut worker = LabelWorker::new(Arc::new(HeuristicNamer));
        assert_eq!(worker.label_for(group.id), FALLBACK_LABEL);

        worker.request(group, infos(&["berkeley", "fournee"]));
        // The worker thread is tiny; give it a moment, then drain.
        for _ in 0..50 {
            worker.drain();
            if worker.label_for(group.id) != FALLBACK_LABEL {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(worker.label_for(group.id), "Keepsakes from Berkeley");
    }

    #[test]
    fn worker_drops_labels_for_vanished_groups() {
        use crate::clustering::cluster;
        use crate::types::Item;

        let items = vec![Item::new(1, "cat", 0.0, 0.0)];
        let groups = cluster(&items, 80.0);
        let mut worker = LabelWorker::new(Arc::new(HeuristicNamer));
        worker.cache.insert(groups[0].id, "stale".to_string());

        worker.retain_groups(&HashSet::new());
        assert_eq!(worker.label_for(groups[0].id), FALLBACK_LABEL);
    }
}
