//! Command-line front end for the invoicing API.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use config::Config;
use dotenvy::dotenv;

use invoice_desk::calc::summary::summarize;
use invoice_desk::domain::document::Document;
use invoice_desk::domain::line_item::{LineItem, RowInput};
use invoice_desk::domain::types::{DocumentId, DocumentMode, DocumentStatus};
use invoice_desk::dto::summary::SummaryDisplay;
use invoice_desk::forms::login::LoginForm;
use invoice_desk::models::config::ClientConfig;
use invoice_desk::repository::HttpRepository;
use invoice_desk::session::FileSessionStore;
use invoice_desk::views::admin::AdminPage;
use invoice_desk::views::auth::{LoginPage, logout};
use invoice_desk::views::clients::ClientsPage;
use invoice_desk::views::editor::{EditorPage, whatsapp_link};
use invoice_desk::views::history::HistoryPage;
use invoice_desk::views::quotations::QuotationsPage;
use invoice_desk::views::{Navigation, NoticeLevel, Outcome, alert_level_to_str, guard};

const USAGE: &str = "usage: invoice-desk <command> [args]

commands:
  login <email> <password>
  logout
  invoices [filter]
  quotations [filter]
  clients [filter]
  status <invoice-id> <pending|paid|cancelled>
  convert <quotation-id>
  share <invoice-id>
  stats
  export [directory]
  totals <items.json> [currency]";

type Repo = HttpRepository<FileSessionStore>;

fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

fn report(outcome: &Outcome) {
    if let Some(notice) = &outcome.notice {
        println!("[{}] {}", alert_level_to_str(&notice.level), notice.message);
    }
    if outcome.navigation == Some(Navigation::Login) {
        println!("Session expired, run `invoice-desk login` first");
    }
}

fn print_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) {
    for document in documents {
        println!(
            "{:<24} {:<12} {:<28} {:>12.2} {}",
            document.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
            document.number().unwrap_or("-"),
            document.client_label(),
            document.total_amount,
            document.status,
        );
    }
}

fn print_totals(path: &str, currency: &str) -> Result<(), String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("Cannot read {path}: {e}"))?;
    let items: Vec<LineItem> =
        serde_json::from_str(&text).map_err(|e| format!("Invalid line items in {path}: {e}"))?;
    let rows: Vec<RowInput> = items.iter().map(RowInput::from).collect();
    let display = SummaryDisplay::from_totals(&summarize(rows.iter(), currency));

    println!("Subtotal:    {} {}", display.currency, display.subtotal);
    println!("Taxes:       {} {}", display.currency, display.taxes);
    println!("Grand total: {} {}", display.currency, display.grand_total);
    println!("{}", display.words);
    Ok(())
}

fn parse_id(raw: Option<&String>) -> Option<DocumentId> {
    raw.and_then(|raw| DocumentId::new(raw.as_str()).ok())
}

async fn run(command: &str, args: &[String], repo: &Repo, config: &ClientConfig) -> Outcome {
    let store = repo.session();

    if command != "login"
        && let Some(outcome) = guard(store)
    {
        return outcome;
    }

    let filter = args.first().map(String::as_str).unwrap_or_default();

    match command {
        "login" => {
            let form = LoginForm {
                email: args.first().cloned().unwrap_or_default(),
                password: args.get(1).cloned().unwrap_or_default(),
            };
            let mut page = LoginPage::default();
            let outcome = page.submit(repo, store, form).await;
            if let Some(error) = page.error {
                eprintln!("{error}");
            } else if let Some(target) = &outcome.navigation {
                println!("Signed in, landing on {}", target.path());
            }
            Outcome::none()
        }
        "logout" => {
            logout(store);
            println!("Signed out");
            Outcome::none()
        }
        "invoices" => {
            let mut page = HistoryPage::default();
            let outcome = page.load(repo).await;
            page.set_filter(filter);
            print_documents(page.visible());
            outcome
        }
        "quotations" => {
            let mut page = QuotationsPage::default();
            let outcome = page.load(repo).await;
            page.set_filter(filter);
            print_documents(page.visible());
            outcome
        }
        "clients" => {
            let mut page = ClientsPage::default();
            let outcome = page.load(repo).await;
            page.set_filter(filter);
            for client in page.visible() {
                println!(
                    "{:<24} {:<28} {}",
                    client.id,
                    client.name,
                    client.phone.as_deref().unwrap_or("-")
                );
            }
            outcome
        }
        "status" => {
            let (Some(id), Some(status)) = (
                parse_id(args.first()),
                args.get(1).and_then(|raw| raw.parse::<DocumentStatus>().ok()),
            ) else {
                eprintln!("{USAGE}");
                return Outcome::none();
            };
            let mut page = HistoryPage::default();
            let outcome = page.load(repo).await;
            if outcome.navigation.is_some() {
                return outcome;
            }
            page.change_status(repo, &id, status).await
        }
        "convert" => {
            let Some(id) = parse_id(args.first()) else {
                eprintln!("{USAGE}");
                return Outcome::none();
            };
            let mut page = QuotationsPage::default();
            let outcome = page.load(repo).await;
            if outcome.navigation.is_some() {
                return outcome;
            }
            page.convert(repo, &id, &ask).await
        }
        "share" => {
            let Some(id) = parse_id(args.first()) else {
                eprintln!("{USAGE}");
                return Outcome::none();
            };
            let mut page = EditorPage::from_config(DocumentMode::Invoice, config);
            let outcome = page.open(repo, Some((&id, DocumentMode::Invoice))).await;
            let failed = outcome
                .notice
                .as_ref()
                .is_some_and(|notice| notice.level != NoticeLevel::Success);
            if failed || outcome.navigation.is_some() {
                return outcome;
            }
            match whatsapp_link(page.session(), &config.company_name) {
                Ok(url) => println!("{url}"),
                Err(err) => eprintln!("{err}"),
            }
            Outcome::none()
        }
        "stats" => {
            let mut page = AdminPage::new(config.protected_admin_email.clone());
            let outcome = page.load_dashboard(repo).await;
            if let Some(stats) = page.stats() {
                println!("Revenue:  {:.2}", stats.total_revenue);
                println!("Invoices: {}", stats.invoices_count);
                println!("Users:    {}", stats.users_count);
                print_documents(&stats.recent_invoices);
            }
            outcome
        }
        "export" => {
            let page = AdminPage::new(config.protected_admin_email.clone());
            let (outcome, file) = page.export(repo).await;
            if let Some(file) = file {
                let target = Path::new(filter).join(&file.file_name);
                if let Err(err) = std::fs::write(&target, &file.bytes) {
                    log::error!("Failed to write {}: {err}", target.display());
                } else {
                    println!("Wrote {}", target.display());
                }
            }
            outcome
        }
        _ => {
            eprintln!("{USAGE}");
            Outcome::none()
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    // Offline commands need no configuration.
    if command == "totals" {
        let Some(path) = rest.first() else {
            eprintln!("{USAGE}");
            std::process::exit(2);
        };
        let currency = rest.get(1).map(String::as_str).unwrap_or_default();
        if let Err(err) = print_totals(path, currency) {
            log::error!("{err}");
            std::process::exit(1);
        }
        return;
    }

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    let store = Arc::new(FileSessionStore::new(&client_config.session_file));
    let repo = match HttpRepository::new(&client_config, store) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    let outcome = run(command, rest, &repo, &client_config).await;
    report(&outcome);
}
