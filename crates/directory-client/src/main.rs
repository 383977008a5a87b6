//! `directory-client`: browse and edit the user directory from a terminal.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use directory_client::api::{DEFAULT_API_URL, DirectoryApi, HttpDirectoryApi};
use directory_client::notice::{NoticeKind, Notices};
use directory_client::routes::Route;
use directory_client::views::form::FormField;
use directory_client::views::{AssumeYes, ConfirmDelete, DetailView, FormMode, FormView, ListView};

/// `directory-client` arguments.
#[derive(Debug, Parser)]
#[command(
    name = "directory-client",
    about = "Browse and edit the user directory",
    version
)]
struct CliArgs {
    /// Base URL of the directory API.
    #[arg(long = "api-url", env = "DIRECTORY_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Request timeout in seconds.
    #[arg(long = "timeout-secs", default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of users, optionally filtered.
    List {
        /// Page to show.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Search text matched against every field.
        #[arg(long)]
        query: Option<String>,
    },
    /// Show a single user.
    View {
        /// User identifier.
        id: String,
    },
    /// Create a user.
    Add(FieldArgs),
    /// Change fields of an existing user.
    Edit {
        /// User identifier.
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a user.
    Delete {
        /// User identifier.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Save the CSV export into a directory.
    Export {
        /// Target directory.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Debug, Args)]
struct FieldArgs {
    /// Display name.
    #[arg(long)]
    name: Option<String>,
    /// Email address.
    #[arg(long)]
    email: Option<String>,
    /// Phone number.
    #[arg(long)]
    phone: Option<String>,
    /// Postal address.
    #[arg(long)]
    address: Option<String>,
    /// Role label.
    #[arg(long)]
    role: Option<String>,
}

impl FieldArgs {
    fn into_pairs(self) -> impl Iterator<Item = (FormField, String)> {
        [
            (FormField::Name, self.name),
            (FormField::Email, self.email),
            (FormField::Phone, self.phone),
            (FormField::Address, self.address),
            (FormField::Role, self.role),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|text| (field, text)))
    }
}

/// Asks on the terminal.
struct PromptConfirm;

impl ConfirmDelete for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if write!(stderr, "{prompt} [y/N] ")
            .and_then(|()| stderr.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let outcome = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))
        .and_then(|runtime| runtime.block_on(async_main()));
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            let _written = writeln!(io::stderr(), "directory-client: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the command; `Ok(false)` means the command reported an error notice.
async fn async_main() -> io::Result<bool> {
    let args = CliArgs::parse();
    let api = HttpDirectoryApi::new(&args.api_url, Duration::from_secs(args.timeout_secs))
        .map_err(io::Error::other)?;
    run(Arc::new(api), args.command).await
}

async fn run<A>(api: Arc<A>, command: Command) -> io::Result<bool>
where
    A: DirectoryApi + ?Sized,
{
    let mut stdout = io::stdout().lock();
    match command {
        Command::List { page, query } => {
            let mut list = ListView::new(api);
            if let Some(text) = query {
                list.set_query(text);
                list.settle_search().await;
            }
            if page != 1 || list.state().search_query.is_empty() {
                list.change_page(page).await;
            }
            write!(stdout, "{}", list.render())?;
            report(list.notices_mut())
        }
        Command::View { id } => {
            let mut detail = DetailView::new(api, id);
            if let Some(route) = detail.load().await {
                return leave(detail.notices_mut(), &route);
            }
            write!(stdout, "{}", detail.render())?;
            writeln!(stdout, "\nEdit: {}", detail.edit_route())?;
            report(detail.notices_mut())
        }
        Command::Add(fields) => {
            let form = FormView::new(api, FormMode::Create);
            submit_form(form, fields, &mut stdout).await
        }
        Command::Edit { id, fields } => {
            let mut form = FormView::new(api, FormMode::Edit(id));
            if let Some(route) = form.load().await {
                return leave(form.notices_mut(), &route);
            }
            submit_form(form, fields, &mut stdout).await
        }
        Command::Delete { id, yes } => {
            let mut list = ListView::new(api);
            let confirm: &dyn ConfirmDelete = if yes { &AssumeYes } else { &PromptConfirm };
            list.delete_user(&id, confirm).await;
            report(list.notices_mut())
        }
        Command::Export { dir } => {
            let mut list = ListView::new(api);
            if let Some(path) = list.export_to(&dir).await {
                writeln!(stdout, "{}", path.display())?;
            }
            report(list.notices_mut())
        }
    }
}

async fn submit_form<A>(
    mut form: FormView<A>,
    fields: FieldArgs,
    stdout: &mut impl Write,
) -> io::Result<bool>
where
    A: DirectoryApi + ?Sized,
{
    for (field, value) in fields.into_pairs() {
        form.set_field(field, value);
    }
    match form.submit().await {
        Some(route) => leave(form.notices_mut(), &route),
        None => {
            write!(stdout, "{}", form.render())?;
            let reported = report(form.notices_mut())?;
            Ok(reported && form.errors().is_empty())
        }
    }
}

fn leave(notices: &mut Notices, route: &Route) -> io::Result<bool> {
    let ok = report(notices)?;
    writeln!(io::stderr(), "-> {route}")?;
    Ok(ok)
}

/// Print pending notices; `false` when any of them is an error.
fn report(notices: &mut Notices) -> io::Result<bool> {
    let mut stderr = io::stderr().lock();
    let mut ok = true;
    for notice in notices.drain() {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => {
                ok = false;
                "error"
            }
        };
        writeln!(stderr, "[{tag}] {}", notice.message)?;
    }
    Ok(ok)
}
