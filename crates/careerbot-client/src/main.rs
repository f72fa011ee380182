use std::sync::Arc;

use clap::Parser;
use dialoguer::{Input, Select};
use eyre::Result;
use tracing::warn;
use uuid::Uuid;

use careerbot_client::api::{ApiClient, CareerApi, DEFAULT_API_URL};
use careerbot_client::persist;
use careerbot_client::prompts::PREDEFINED_PROMPTS;
use careerbot_client::registration::{REGISTRATION_FAILED, RegistrationForm};
use careerbot_client::session::Session;
use careerbot_core::models::chat::ChatRole;
use careerbot_core::models::student::Student;

/// Career guidance chat for Class 10 students.
#[derive(Parser)]
#[command(name = "careerbot", version)]
struct Args {
    /// API base URL, including the /api prefix.
    #[arg(long, env = "CAREERBOT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Resume an existing registration instead of signing up.
    #[arg(long)]
    student_id: Option<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let api: Arc<dyn CareerApi> = Arc::new(ApiClient::new(&args.api_url));

    let student = match args.student_id {
        Some(id) => api
            .get_student(id)
            .await
            .map_err(|e| eyre::eyre!("could not load student {id}: {e}"))?,
        None => sign_up(api.as_ref()).await?,
    };

    let (saves, worker) = persist::spawn(api.clone());
    let mut session = Session::new(student, api, saves);

    landing(&mut session).await?;

    session.sign_out();
    let failed = worker
        .finish()
        .await
        .into_iter()
        .filter(|o| matches!(o, persist::SaveOutcome::Failed { .. }))
        .count();
    if failed > 0 {
        warn!(failed, "some transcript saves did not complete");
    }

    Ok(())
}

async fn sign_up(api: &dyn CareerApi) -> Result<Student> {
    println!("Career Guidance Bot");
    println!("For Class 10 Students\n");

    loop {
        let form = RegistrationForm {
            name: Input::new()
                .with_prompt("Full Name")
                .allow_empty(true)
                .interact_text()?,
            interests: Input::new()
                .with_prompt("Your Interests (e.g., Science, Technology, Art)")
                .allow_empty(true)
                .interact_text()?,
            location: Input::new()
                .with_prompt("Location")
                .allow_empty(true)
                .interact_text()?,
        };
        // Single option.
        let _class = Select::new()
            .with_prompt("Class")
            .items(&["Class 10"])
            .default(0)
            .interact()?;

        match form.submit(api).await {
            Ok(student) => return Ok(student),
            Err(e) => {
                warn!(error = %e, "registration failed");
                println!("\n{REGISTRATION_FAILED}\n");
            }
        }
    }
}

async fn landing(session: &mut Session) -> Result<()> {
    println!("\nWelcome, {}! 🎓", session.student().name);
    println!("Choose a topic below to start your personalized career guidance chat.\n");

    loop {
        let mut items: Vec<&str> = PREDEFINED_PROMPTS.iter().map(|p| p.title).collect();
        items.push(if session.is_open() { "Close chat" } else { "Open chat" });
        items.push("Sign out");

        let choice = Select::new().items(&items[..]).default(0).interact()?;

        if let Some(prompt) = PREDEFINED_PROMPTS.get(choice) {
            session.begin_prompt(prompt);
            answer(session).await;
            converse(session).await?;
        } else if choice == PREDEFINED_PROMPTS.len() {
            if session.toggle() {
                render(session);
                converse(session).await?;
            }
        } else {
            return Ok(());
        }
    }
}

/// Read messages until the student types `/close`.
async fn converse(session: &mut Session) -> Result<()> {
    println!("(type /close to return to topics)");

    loop {
        let text: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .report(false)
            .interact_text()?;

        if text.trim() == "/close" {
            session.close();
            return Ok(());
        }

        if session.begin_send(&text) {
            answer(session).await;
        }
    }
}

/// Show the posted question, then wait for and show the reply.
async fn answer(session: &mut Session) {
    render(session);
    if session.is_loading() {
        println!("Typing...");
    }
    session.complete_send().await;
    render(session);
}

fn render(session: &mut Session) {
    for turn in session.unseen() {
        match turn.role {
            ChatRole::User => println!("You: {}", turn.content),
            ChatRole::Assistant => println!("Career Bot: {}\n", turn.content),
        }
    }
}
