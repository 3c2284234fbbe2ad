mod test_utils;

use paperforge::config::GenerationOptions;
use paperforge::dispatcher::{Dispatcher, DispatcherSettings};
use paperforge::error::GenerationError;
use paperforge::paper::{Orchestrator, PaperRequest, PaperType, Section};
use test_utils::{MockGenerator, fast_settings};

fn sample_request() -> PaperRequest {
    PaperRequest {
        topic: "Impact of renewable energy adoption on rural electrification".to_string(),
        paper_type: PaperType::ResearchPaper,
        author: "AI Generated".to_string(),
        target_length: 3000,
        include_citations: true,
    }
}

#[tokio::test]
async fn produces_exactly_the_seven_fixed_sections() {
    let generator = MockGenerator::respond("section body text");
    let orchestrator = Orchestrator::new(Dispatcher::new(generator.clone(), fast_settings()));

    let sections = orchestrator
        .generate_sections(&sample_request(), &GenerationOptions::default(), |_, _| {})
        .await
        .expect("all sections should generate");

    assert_eq!(sections.len(), Section::ALL.len());
    for section in Section::ALL {
        assert_eq!(sections.get(section).map(String::as_str), Some("section body text"));
    }
    // One submission per section; section prompts sit under the chunking threshold
    assert_eq!(generator.call_count(), Section::ALL.len());
}

#[tokio::test]
async fn progress_reaches_one_and_names_each_section() {
    let generator = MockGenerator::respond("body");
    let orchestrator = Orchestrator::new(Dispatcher::new(generator, fast_settings()));

    let mut fractions: Vec<f64> = Vec::new();
    let mut statuses: Vec<String> = Vec::new();
    orchestrator
        .generate_sections(
            &sample_request(),
            &GenerationOptions::default(),
            |fraction, status| {
                fractions.push(fraction);
                statuses.push(status.to_string());
            },
        )
        .await
        .expect("all sections should generate");

    assert_eq!(fractions.len(), 7);
    assert!((fractions[6] - 1.0).abs() < f64::EPSILON);
    assert!(fractions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(statuses.iter().all(|s| s.starts_with("Finished: ")));
}

#[tokio::test]
async fn prompts_interpolate_topic_and_paper_type() {
    let generator = MockGenerator::echo();
    let orchestrator = Orchestrator::new(Dispatcher::new(generator.clone(), fast_settings()));

    orchestrator
        .generate_sections(&sample_request(), &GenerationOptions::default(), |_, _| {})
        .await
        .expect("all sections should generate");

    let prompts = generator.received_prompts();
    assert!(
        prompts
            .iter()
            .all(|p| p.contains("Impact of renewable energy adoption on rural electrification"))
    );
    assert!(prompts.iter().all(|p| p.contains("research paper")));
}

#[tokio::test]
async fn section_failure_aborts_the_run_and_names_the_section() {
    let generator = MockGenerator::always_fail();
    let orchestrator = Orchestrator::new(Dispatcher::new(generator, fast_settings()));
    let options = GenerationOptions::default().with_retry_count(1);

    let error = orchestrator
        .generate_sections(&sample_request(), &options, |_, _| {})
        .await
        .expect_err("the run should abort");

    match error {
        GenerationError::SectionFailed { section, source } => {
            assert!(Section::ALL.iter().any(|s| s.key() == section));
            assert!(matches!(*source, GenerationError::RetryExhausted { .. }));
        }
        other => panic!("expected SectionFailed, got {other}"),
    }
}

#[tokio::test]
async fn quota_failure_stops_new_requests_from_being_issued() {
    let generator = MockGenerator::quota();
    // Pool of one serializes requests, so the first quota failure is
    // observed before any further section request can be issued.
    let settings = DispatcherSettings {
        max_parallel_requests: 1,
        ..fast_settings()
    };
    let orchestrator = Orchestrator::new(Dispatcher::new(generator.clone(), settings));

    let error = orchestrator
        .generate_sections(&sample_request(), &GenerationOptions::default(), |_, _| {})
        .await
        .expect_err("quota should abort the run");

    match error {
        GenerationError::SectionFailed { source, .. } => {
            assert!(source.is_quota());
        }
        other => panic!("expected SectionFailed, got {other}"),
    }
    assert_eq!(generator.call_count(), 1);
}
