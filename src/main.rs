//! Terminal front end for a single reflection session.
//!
//! Reads one answer per line from stdin. For questions with options, a number
//! selects the matching option; anything else is taken as a free answer.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use tree_hollow::adapters::{SimulatedInferenceDelay, StdRandomSource};
use tree_hollow::application::{
    FinishSessionCommand, ReflectionService, StartSessionCommand, SubmitAnswerCommand,
};
use tree_hollow::config::AppConfig;
use tree_hollow::domain::reflection::{Question, QuestionBank};
use tree_hollow::ports::RandomSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init()?;

    let service = ReflectionService::new(
        QuestionBank::shared(),
        config.dialogue.policy(),
        Arc::new(|| Box::new(StdRandomSource::from_entropy()) as Box<dyn RandomSource>),
        Arc::new(SimulatedInferenceDelay::from_config(&config.latency)),
    );

    let started = service.start.handle(StartSessionCommand::default()).await;
    let session_id = started.session_id;
    println!("{}\n", started.welcome.text);

    let mut pending = Some(started.first_question);
    if let Some(question) = &pending {
        print_question(question);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(question) = &pending else {
            break;
        };

        let answer = resolve_answer(question, line);
        let turn = service
            .submit
            .handle(SubmitAnswerCommand::new(session_id, answer))
            .await?;
        println!("\n💬 {}\n", turn.message.text);

        pending = turn.next_question;
        match &pending {
            Some(question) => print_question(question),
            None => {
                let finished = service
                    .finish
                    .handle(FinishSessionCommand { session_id })
                    .await?;
                println!("{}", finished.guidance);
                info!(%session_id, emotion = %finished.emotion, "session complete");
                break;
            }
        }
    }

    service.discard(&session_id).await;
    Ok(())
}

fn print_question(question: &Question) {
    println!("{}", question.text);
    for (index, option) in question.options().iter().enumerate() {
        println!("  {}. {}", index + 1, option);
    }
}

/// Maps a numeric reply to the option it names.
fn resolve_answer(question: &Question, line: &str) -> String {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| question.options().get(index))
        .cloned()
        .unwrap_or_else(|| line.to_string())
}
