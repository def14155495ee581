// src/resolver.rs
//! Pasted URL/handle → canonical [`ChannelRecord`].

use crate::api::VideoPlatform;
use crate::core::handle::{extract_handle, handle_url};
use crate::directory::ChannelRecord;
use crate::error::ResolveError;

pub struct HandleResolver<'a, P: ?Sized> {
    platform: &'a P,
}

impl<'a, P: VideoPlatform + ?Sized> HandleResolver<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        Self { platform }
    }

    /// Resolve one input line.
    ///
    /// The returned URL is rebuilt from the handle, not copied from the input.
    /// Service failures are indistinguishable from "not found" and come back
    /// as `NoMatch`.
    pub fn resolve(&self, raw_input: &str) -> Result<ChannelRecord, ResolveError> {
        let handle = extract_handle(raw_input).ok_or(ResolveError::NotAHandle)?;
        let no_match = || ResolveError::NoMatch { handle: handle.clone() };

        let hits = match self.platform.search_channels(&join!("@", &handle), 1) {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(%handle, error = %e, "channel search failed");
                return Err(no_match());
            }
        };

        let hit = hits.into_iter().next().ok_or_else(no_match)?;
        let (Some(id), Some(name)) = (hit.channel_id, hit.title) else {
            tracing::debug!(%handle, "search hit without id or title");
            return Err(no_match());
        };
        let (id, name) = (id.trim(), name.trim());
        if id.is_empty() {
            return Err(no_match());
        }

        tracing::debug!(%handle, channel_id = id, "handle resolved");
        Ok(ChannelRecord {
            name: s!(name),
            url: handle_url(&handle),
            id: s!(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChannelHit, ChannelStatistics, UploadHit, VideoDetails, VideoStatistics};
    use crate::error::ApiError;
    use std::cell::RefCell;

    /// Answers every search with `hits`, or fails when `down`.
    struct Search {
        hits: Vec<ChannelHit>,
        down: bool,
        queries: RefCell<Vec<(String, u32)>>,
    }

    impl Search {
        fn with(hits: Vec<ChannelHit>) -> Self {
            Self { hits, down: false, queries: RefCell::new(Vec::new()) }
        }
    }

    impl VideoPlatform for Search {
        fn search_channels(&self, query: &str, max_results: u32) -> Result<Vec<ChannelHit>, ApiError> {
            self.queries.borrow_mut().push((s!(query), max_results));
            if self.down {
                return Err(ApiError::Status { endpoint: s!("search"), status: 503, body: s!() });
            }
            Ok(self.hits.clone())
        }
        fn channel_statistics(&self, _: &str) -> Result<Option<ChannelStatistics>, ApiError> { unreachable!() }
        fn recent_uploads(&self, _: &str, _: u32) -> Result<Vec<UploadHit>, ApiError> { unreachable!() }
        fn video_statistics(&self, _: &[String]) -> Result<Vec<VideoStatistics>, ApiError> { unreachable!() }
        fn video_details(&self, _: &[String]) -> Result<Vec<VideoDetails>, ApiError> { unreachable!() }
    }

    fn hit(id: &str, title: &str) -> ChannelHit {
        ChannelHit { channel_id: Some(s!(id)), title: Some(s!(title)) }
    }

    #[test]
    fn resolves_and_rebuilds_canonical_url() {
        let api = Search::with(vec![hit(" UC123 ", " My Channel ")]);
        let rec = HandleResolver::new(&api)
            .resolve("https://m.youtube.com/@My-Channel_01/videos?x=1")
            .unwrap();
        assert_eq!(rec.name, "My Channel");
        assert_eq!(rec.id, "UC123");
        assert_eq!(rec.url, "https://www.youtube.com/@My-Channel_01");
        assert_eq!(*api.queries.borrow(), vec![(s!("@My-Channel_01"), 1)]);
    }

    #[test]
    fn no_handle_makes_no_call() {
        let api = Search::with(vec![hit("UC1", "x")]);
        assert_eq!(
            HandleResolver::new(&api).resolve("no-at-sign-here"),
            Err(ResolveError::NotAHandle)
        );
        assert!(api.queries.borrow().is_empty());
    }

    #[test]
    fn empty_results_and_outages_are_no_match() {
        let empty = Search::with(vec![]);
        assert_eq!(
            HandleResolver::new(&empty).resolve("@ghost"),
            Err(ResolveError::NoMatch { handle: s!("ghost") })
        );

        let mut down = Search::with(vec![hit("UC1", "x")]);
        down.down = true;
        assert_eq!(
            HandleResolver::new(&down).resolve("@ghost"),
            Err(ResolveError::NoMatch { handle: s!("ghost") })
        );
    }

    #[test]
    fn hit_without_id_is_no_match() {
        let api = Search::with(vec![ChannelHit { channel_id: None, title: Some(s!("t")) }]);
        assert!(matches!(
            HandleResolver::new(&api).resolve("@x"),
            Err(ResolveError::NoMatch { .. })
        ));
    }
}
