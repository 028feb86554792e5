//! End-to-end reflection sessions through the application handlers.
//!
//! Uses scripted randomness and no delay so every question and message is
//! known in advance.

use std::sync::Arc;

use futures::future::join_all;

use tree_hollow::adapters::{NoDelay, ScriptedRandomSource};
use tree_hollow::application::{
    FinishSessionCommand, FinishSessionError, ReflectionService, StartSessionCommand,
    SubmitAnswerCommand, SubmitAnswerError,
};
use tree_hollow::domain::reflection::{
    DialoguePolicy, DialogueState, Emotion, GuidanceGenerator, IdentificationPolicy,
    PresentationTag, QuestionBank, ResponseComposer, Tier,
};
use tree_hollow::ports::RandomSource;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn service_with(policy: DialoguePolicy) -> ReflectionService {
    ReflectionService::new(
        QuestionBank::shared(),
        policy,
        Arc::new(|| Box::new(ScriptedRandomSource::first()) as Box<dyn RandomSource>),
        Arc::new(NoDelay),
    )
}

fn service() -> ReflectionService {
    service_with(DialoguePolicy::default())
}

// =============================================================================
// Full sessions
// =============================================================================

#[tokio::test]
async fn anxiety_session_walks_all_tiers_and_ends_with_anxiety_guidance() {
    let service = service();
    let started = service.start.handle(StartSessionCommand::default()).await;
    let id = started.session_id;
    assert_eq!(started.first_question.id.as_str(), "e1");

    let script = [
        ("我很焦虑，压力很大", Some("e2"), 1),
        ("还是很紧张", Some("c1_anxiety"), 2),
        ("工作上的事让我担心", Some("c2_anxiety"), 2),
        ("心跳很快，很紧张", Some("s1_anxiety"), 3),
        ("好的，开始吧，还是有点紧张", Some("s2_anxiety"), 3),
        ("以前跑步能缓解紧张", None, 3),
    ];

    for (answer, expected_next, expected_tier) in script {
        let turn = service
            .submit
            .handle(SubmitAnswerCommand::new(id, answer))
            .await
            .unwrap();
        assert_eq!(turn.emotion, Emotion::Anxiety, "answer {answer}");
        assert_eq!(
            turn.next_question.as_ref().map(|q| q.id.as_str()),
            expected_next,
            "answer {answer}"
        );

        let engine = service.registry().get(&id).await.unwrap();
        assert_eq!(engine.lock().await.session().current_tier(), expected_tier);
    }

    let finished = service
        .finish
        .handle(FinishSessionCommand { session_id: id })
        .await
        .unwrap();
    assert_eq!(
        finished.guidance,
        GuidanceGenerator::template_for(Emotion::Anxiety).render()
    );
    assert_eq!(finished.session.responses().len(), 6);
}

#[tokio::test]
async fn every_recorded_response_resolves_in_the_bank() {
    let service = service();
    let id = service.start.handle(StartSessionCommand::default()).await.session_id;
    for answer in ["今天和同事一起去吃了午饭然后回来继续工作", "一两天", "嗯", "好", "行", "可以"] {
        match service.submit.handle(SubmitAnswerCommand::new(id, answer)).await {
            Ok(turn) if turn.is_final() => break,
            Ok(_) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    let bank = QuestionBank::shared();
    let engine = service.registry().get(&id).await.unwrap();
    let engine = engine.lock().await;
    for response in engine.session().responses() {
        assert!(bank.find(&response.question_id).is_some(), "{}", response.question_id);
    }
}

#[tokio::test]
async fn calm_exploration_ends_without_coping() {
    let service = service();
    let id = service.start.handle(StartSessionCommand::default()).await.session_id;

    service.submit.handle(SubmitAnswerCommand::new(id, "还好")).await.unwrap();
    let to_explore = service
        .submit
        .handle(SubmitAnswerCommand::new(id, "刚刚"))
        .await
        .unwrap();
    // Calm has no dedicated list; the generic pool supplies the question.
    assert_eq!(to_explore.next_question.unwrap().tier, Tier::Exploration);

    service.submit.handle(SubmitAnswerCommand::new(id, "没什么")).await.unwrap();
    let last = service
        .submit
        .handle(SubmitAnswerCommand::new(id, "嗯"))
        .await
        .unwrap();
    assert!(last.is_final());
    assert_eq!(last.state, DialogueState::Ended);
    assert_eq!(last.message.presentation_tag, PresentationTag::Happy);
    assert!(ResponseComposer::farewell_pool().contains(&last.message.text.as_str()));

    let finished = service
        .finish
        .handle(FinishSessionCommand { session_id: id })
        .await
        .unwrap();
    assert_eq!(
        finished.guidance,
        GuidanceGenerator::template_for(Emotion::Calm).render()
    );
}

#[tokio::test]
async fn repeat_second_policy_stays_in_identification() {
    let service = service_with(DialoguePolicy {
        identification: IdentificationPolicy::RepeatSecond,
        ..DialoguePolicy::default()
    });
    let id = service.start.handle(StartSessionCommand::default()).await.session_id;

    for _ in 0..4 {
        let turn = service
            .submit
            .handle(SubmitAnswerCommand::new(id, "有些不安"))
            .await
            .unwrap();
        assert_eq!(turn.next_question.unwrap().id.as_str(), "e2");
        assert_eq!(turn.state, DialogueState::Tier1);
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn finish_before_end_and_submit_after_end_are_rejected() {
    let service = service();
    let id = service.start.handle(StartSessionCommand::default()).await.session_id;

    let early = service.finish.handle(FinishSessionCommand { session_id: id }).await;
    assert_eq!(early.unwrap_err(), FinishSessionError::SessionNotEnded(id));

    let long = "最近发生了很多事情，".repeat(6) + "难过";
    service.submit.handle(SubmitAnswerCommand::new(id, "难过")).await.unwrap();
    let coping = service
        .submit
        .handle(SubmitAnswerCommand::new(id, long.as_str()))
        .await
        .unwrap();
    assert_eq!(coping.next_question.unwrap().id.as_str(), "s1_sadness");

    service.submit.handle(SubmitAnswerCommand::new(id, "有的，还是难过")).await.unwrap();
    let last = service
        .submit
        .handle(SubmitAnswerCommand::new(id, "听音乐吧，难过"))
        .await
        .unwrap();
    assert!(last.is_final());

    let late = service.submit.handle(SubmitAnswerCommand::new(id, "再见")).await;
    assert_eq!(late.unwrap_err(), SubmitAnswerError::SessionEnded(id));
}

#[tokio::test]
async fn discarded_session_is_gone() {
    let service = service();
    let id = service.start.handle(StartSessionCommand::default()).await.session_id;
    assert!(service.discard(&id).await);

    let result = service.submit.handle(SubmitAnswerCommand::new(id, "你好")).await;
    assert_eq!(result.unwrap_err(), SubmitAnswerError::SessionNotFound(id));
}

#[tokio::test]
async fn independent_sessions_run_concurrently() {
    let service = service();
    let mut ids = Vec::new();
    for _ in 0..8 {
        ids.push(service.start.handle(StartSessionCommand::default()).await.session_id);
    }

    let turns = join_all(ids.iter().map(|id| {
        let submit = service.submit.clone();
        let id = *id;
        async move { submit.handle(SubmitAnswerCommand::new(id, "今天很开心")).await }
    }))
    .await;

    for turn in turns {
        let turn = turn.unwrap();
        assert_eq!(turn.emotion, Emotion::Happiness);
        assert_eq!(turn.next_question.unwrap().id.as_str(), "e2");
    }
    assert_eq!(service.registry().len().await, 8);
}
