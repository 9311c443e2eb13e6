use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::SearchSession;
use crate::search::testing::RecordingExecutor;
use crate::search::{
    DEBOUNCE, DEFAULT_LINK_BASE, DescriptionResult, EnabledFacets, Facet, FacetResponse,
    FetchError, FetchPayload, MemoryLocation, PAGE_SIZE, Pagination, ResultId, ResultPage,
    SEARCH_FAILED, SEARCHING, Segment, TitleResult, ViewportGeometry,
};

type Completion = Result<FetchPayload, FetchError>;

fn open(link: &str) -> (SearchSession, RecordingExecutor, Instant) {
    let executor = RecordingExecutor::default();
    let location = MemoryLocation::from_link(link, DEFAULT_LINK_BASE).expect("link");
    let now = Instant::now();
    let session = SearchSession::new(Box::new(executor.clone()), location, now);
    (session, executor, now)
}

fn settle(session: &mut SearchSession, text: &str, now: Instant) -> Instant {
    session.input(text, now);
    let later = now + DEBOUNCE;
    session.tick(later);
    later
}

fn respond(
    session: &mut SearchSession,
    executor: &RecordingExecutor,
    facet: Facet,
    payload: Completion,
    now: Instant,
) -> bool {
    let call = executor.last_for(facet).expect("request issued for facet");
    session.apply(call.respond(payload), now)
}

fn titles(count: usize, total: u64) -> Completion {
    Ok(FetchPayload::Titles(FacetResponse {
        data: (0..count)
            .map(|index| TitleResult {
                video_id: format!("t{index}"),
                title: format!("Title {index}"),
                channel_name: None,
                upload_date: None,
                is_available: index != 0,
            })
            .collect(),
        total_count: Some(total),
    }))
}

fn descriptions(count: usize) -> Completion {
    Ok(FetchPayload::Descriptions(FacetResponse {
        data: (0..count)
            .map(|index| DescriptionResult {
                video_id: format!("d{index}"),
                title: format!("Video {index}"),
                description: "a talk about rust".into(),
                channel_name: Some("Channel".into()),
                is_available: true,
            })
            .collect(),
        total_count: Some(count as u64),
    }))
}

fn segments(offset: u64, count: u64, total: u64) -> Completion {
    Ok(FetchPayload::Segments(ResultPage {
        items: (offset..offset + count)
            .map(|index| Segment {
                id: ResultId::Number(index as i64),
                video_id: format!("v{index}"),
                video_title: None,
                channel_name: None,
                text: format!("segment {index}"),
                start_time: index as f64,
                end_time: index as f64 + 1.0,
                language: Some("en".into()),
                is_available: true,
            })
            .collect(),
        pagination: Some(Pagination {
            total,
            limit: u64::from(PAGE_SIZE),
            offset,
            has_more: offset + count < total,
        }),
        available_languages: vec!["en".into(), "fr".into()],
    }))
}

fn sentinel_in_view() -> Option<ViewportGeometry> {
    Some(ViewportGeometry {
        start: 0,
        len: 600,
        sentinel: 400,
    })
}

#[test]
fn short_queries_never_reach_the_network() {
    let (mut session, executor, now) = open("");
    let now = settle(&mut session, "a", now);
    settle(&mut session, " b ", now);
    assert_eq!(executor.len(), 0);
    assert_eq!(session.status(), "");
    assert!(session.query().is_none());
}

#[test]
fn rapid_edits_issue_one_request_per_facet() {
    let (mut session, executor, mut now) = open("");
    for text in ["m", "ma", "mac", "mach", "machine"] {
        session.input(text, now);
        assert!(!session.tick(now));
        now += Duration::from_millis(100);
    }
    assert_eq!(executor.len(), 0);
    assert!(session.tick(now + DEBOUNCE));
    assert!(!session.tick(now + DEBOUNCE * 2));
    assert_eq!(executor.len(), 3);
    for facet in Facet::ALL {
        let call = executor.last_for(facet).expect("one call per facet");
        assert_eq!(call.request.key.query, "machine");
    }
}

#[test]
fn machine_learning_pages_through_forty_seven_transcripts() {
    let (mut session, executor, now) = open("");
    let now = settle(&mut session, "machine learning", now);
    assert_eq!(session.status(), SEARCHING);

    respond(&mut session, &executor, Facet::Titles, titles(0, 0), now);
    respond(&mut session, &executor, Facet::Descriptions, descriptions(0), now);
    respond(&mut session, &executor, Facet::Segments, segments(0, 20, 47), now);
    assert!(session.segments().has_next_page());

    assert!(session.viewport_changed(sentinel_in_view()));
    assert!(!session.viewport_changed(sentinel_in_view()));
    assert_eq!(executor.requests().len(), 4);
    respond(&mut session, &executor, Facet::Segments, segments(20, 20, 47), now);

    assert!(session.viewport_changed(sentinel_in_view()));
    let last = executor.last_for(Facet::Segments).expect("third page");
    assert_eq!(last.request.offset, 40);
    respond(&mut session, &executor, Facet::Segments, segments(40, 7, 47), now);

    assert_eq!(session.segments().data().len(), 47);
    assert!(!session.segments().has_next_page());
    assert!(session.segments().reached_end());
    assert!(!session.viewport_changed(sentinel_in_view()));
    assert!(session.status().contains("47 transcript"));
    assert_eq!(
        session.announcement(),
        "Found 47 transcript matches for 'machine learning'"
    );
}

#[test]
fn no_results_keeps_filters_interactive() {
    let (mut session, executor, now) = open("");
    let now = settle(&mut session, "xyz123", now);
    respond(&mut session, &executor, Facet::Titles, titles(0, 0), now);
    respond(&mut session, &executor, Facet::Descriptions, descriptions(0), now);
    respond(&mut session, &executor, Facet::Segments, segments(0, 0, 0), now);

    assert_eq!(session.status(), "No results found for 'xyz123'");
    assert!(session.is_empty_result());
    assert!(session.toggle_facet(Facet::Titles, now));
    assert!(!session.state().enabled.contains(Facet::Titles));
}

#[test]
fn a_failing_facet_does_not_affect_the_others() {
    let (mut session, executor, now) = open("");
    let now = settle(&mut session, "rust", now);
    let failure = Err(FetchError::Server {
        status: 500,
        message: None,
    });
    respond(&mut session, &executor, Facet::Titles, failure, now);
    respond(&mut session, &executor, Facet::Descriptions, descriptions(2), now);
    respond(&mut session, &executor, Facet::Segments, segments(0, 5, 5), now);

    assert!(session.facet_error(Facet::Titles).is_some());
    assert!(session.facet_error(Facet::Descriptions).is_none());
    assert!(session.facet_error(Facet::Segments).is_none());
    assert_eq!(session.descriptions().data().len(), 2);
    assert_eq!(session.segments().data().len(), 5);
    assert_eq!(
        session.status(),
        "Found 2 description and 5 transcript matches for 'rust'"
    );

    let before = executor.len();
    assert!(session.retry(Facet::Titles));
    assert_eq!(executor.len(), before + 1);
    assert_eq!(session.status(), SEARCHING);
    respond(&mut session, &executor, Facet::Titles, titles(3, 3), now);
    assert!(session.facet_error(Facet::Titles).is_none());
}

#[test]
fn every_enabled_facet_failing_reports_failure() {
    let (mut session, executor, now) = open("types=titles,descriptions");
    let now = settle(&mut session, "rust", now);
    let down = || Err(FetchError::Network("connection refused".into()));
    respond(&mut session, &executor, Facet::Titles, down(), now);
    respond(&mut session, &executor, Facet::Descriptions, down(), now);
    assert_eq!(session.status(), SEARCH_FAILED);
    assert!(executor.last_for(Facet::Segments).is_none());
}

#[test]
fn clearing_the_query_resets_facets_and_link() {
    let (mut session, executor, now) = open("");
    let now = settle(&mut session, "rust", now);
    respond(&mut session, &executor, Facet::Titles, titles(2, 2), now);
    respond(&mut session, &executor, Facet::Descriptions, descriptions(1), now);
    respond(&mut session, &executor, Facet::Segments, segments(0, 20, 60), now);
    assert_eq!(session.link().href(), "http://localhost:3000/search?q=rust");

    settle(&mut session, "", now);
    assert!(session.titles().data().is_empty());
    assert!(session.descriptions().data().is_empty());
    assert!(session.segments().data().is_empty());
    for facet in Facet::ALL {
        assert!(!session.is_loading(facet));
        assert!(session.facet_error(facet).is_none());
    }
    assert_eq!(session.link().href(), DEFAULT_LINK_BASE);
    assert_eq!(session.status(), "");
}

#[test]
fn superseded_query_results_are_ignored() {
    let (mut session, executor, now) = open("types=titles");
    let now = settle(&mut session, "rust", now);
    let stale = executor.last_for(Facet::Titles).expect("first");
    let now = settle(&mut session, "rusty", now);
    assert!(stale.token.is_cancelled());

    assert!(!session.apply(stale.respond(titles(9, 9)), now));
    assert!(session.titles().data().is_empty());
    respond(&mut session, &executor, Facet::Titles, titles(1, 1), now);
    assert_eq!(session.status(), "Found 1 title matches for 'rusty'");
}

#[test]
fn second_query_does_not_reuse_first_query_results() {
    let (mut session, executor, now) = open("types=titles");
    let now = settle(&mut session, "rust", now);
    respond(&mut session, &executor, Facet::Titles, titles(3, 3), now);
    assert_eq!(session.status(), "Found 3 title matches for 'rust'");

    let now = settle(&mut session, "python", now);
    assert!(session.titles().is_loading());
    assert!(session.titles().data().is_empty());
    assert_eq!(session.status(), SEARCHING);
    assert_eq!(session.announcement(), SEARCHING);

    respond(&mut session, &executor, Facet::Titles, titles(1, 1), now);
    assert_eq!(session.status(), "Found 1 title matches for 'python'");
}

#[test]
fn language_change_only_refetches_transcripts() {
    let (mut session, executor, now) = open("");
    let now = settle(&mut session, "rust", now);
    respond(&mut session, &executor, Facet::Segments, segments(0, 20, 60), now);
    let before = executor.len();

    assert!(session.cycle_language(now));
    assert_eq!(session.state().language.as_deref(), Some("en"));
    assert_eq!(executor.len(), before + 1);
    let call = executor.last_for(Facet::Segments).expect("segments");
    assert_eq!(call.request.key.language.as_deref(), Some("en"));
    assert_eq!(call.request.offset, 0);
    assert!(session.segments().data().is_empty());
    assert_eq!(session.link().href(), "http://localhost:3000/search?q=rust&language=en");
}

#[test]
fn toggles_are_mirrored_to_the_link() {
    let (mut session, executor, now) = open("");
    let now = settle(&mut session, "rust", now);
    assert!(session.toggle_facet(Facet::Segments, now));
    assert!(session.toggle_facet(Facet::Descriptions, now));
    assert!(!session.toggle_facet(Facet::Titles, now));
    assert_eq!(session.state().enabled, EnabledFacets::only(Facet::Titles));
    assert!(executor.last_for(Facet::Segments).expect("segments").token.is_cancelled());
    assert_eq!(
        session.link().href(),
        "http://localhost:3000/search?q=rust&types=titles"
    );
    let writes = session.link().writes();
    assert!(!session.toggle_facet(Facet::Titles, now));
    assert_eq!(session.link().writes(), writes);
}

#[test]
fn shared_links_search_without_waiting() {
    let (session, executor, _) = open("http://localhost:3000/search?q=rust&types=titles");
    assert_eq!(executor.len(), 1);
    assert_eq!(session.query(), Some("rust"));
    assert_eq!(session.link().writes(), 0);
    assert_eq!(session.status(), SEARCHING);
}

#[test]
fn unavailable_videos_are_hidden_unless_requested() {
    let (mut session, executor, now) = open("types=titles");
    let now = settle(&mut session, "rust", now);
    respond(&mut session, &executor, Facet::Titles, titles(3, 3), now);
    assert_eq!(session.visible_titles().len(), 2);

    assert!(session.set_include_unavailable(true));
    assert!(!session.set_include_unavailable(true));
    assert_eq!(session.visible_titles().len(), 3);
    assert_eq!(
        session.link().href(),
        "http://localhost:3000/search?q=rust&types=titles&include_unavailable=true"
    );
}

#[test]
fn status_listeners_hear_each_change_once() {
    let (mut session, executor, now) = open("");
    let heard = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&heard);
    session.subscribe_status(move |status| sink.borrow_mut().push(status.clone()));

    let now = settle(&mut session, "rust", now);
    respond(&mut session, &executor, Facet::Titles, titles(0, 0), now);
    respond(&mut session, &executor, Facet::Descriptions, descriptions(0), now);
    respond(&mut session, &executor, Facet::Segments, segments(0, 5, 5), now);

    assert_eq!(
        *heard.borrow(),
        vec![
            SEARCHING.to_string(),
            "Found 5 transcript matches for 'rust'".to_string()
        ]
    );
}

#[test]
fn state_listeners_stop_after_unsubscribing() {
    let (mut session, _executor, now) = open("");
    let heard = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&heard);
    let id = session.subscribe_state(move |state| sink.borrow_mut().push(state.enabled));

    assert!(session.toggle_facet(Facet::Titles, now));
    assert_eq!(heard.borrow().len(), 1);
    assert!(!heard.borrow()[0].contains(Facet::Titles));

    assert!(session.unsubscribe_state(id));
    assert!(!session.unsubscribe_state(id));
    assert!(session.toggle_facet(Facet::Titles, now));
    assert_eq!(heard.borrow().len(), 1);
}

#[test]
fn failed_next_page_is_retried_from_where_it_stopped() {
    let (mut session, executor, now) = open("types=transcripts");
    let now = settle(&mut session, "rust", now);
    respond(&mut session, &executor, Facet::Segments, segments(0, 20, 60), now);
    assert!(session.fetch_next_page());
    let timeout = Err(FetchError::Network("timed out".into()));
    respond(&mut session, &executor, Facet::Segments, timeout, now);

    assert!(session.facet_error(Facet::Segments).is_some());
    assert_eq!(session.segments().data().len(), 20);
    assert!(session.retry(Facet::Segments));
    let call = executor.last_for(Facet::Segments).expect("retry");
    assert_eq!(call.request.offset, 20);
}
