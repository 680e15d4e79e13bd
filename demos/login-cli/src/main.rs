use loginkit::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

const DEFAULT_STORE_PATH: &str = "loginkit-session.json";

enum Command {
    Status,
    SignIn { email: String, password: String },
    SignOut,
}

fn parse_args() -> Option<Command> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Some(Command::Status),
        [cmd] if cmd == "status" => Some(Command::Status),
        [cmd] if cmd == "sign-out" => Some(Command::SignOut),
        [email, password] => Some(Command::SignIn {
            email: email.clone(),
            password: password.clone(),
        }),
        _ => None,
    }
}

fn login_config() -> Result<LoginConfig, Box<dyn std::error::Error>> {
    let mut config = LoginConfig::default();
    if let Ok(rate) = std::env::var("LOGINKIT_FAILURE_RATE") {
        config.failure_rate = rate
            .parse()
            .map_err(|e| format!("LOGINKIT_FAILURE_RATE={rate:?}: {e}"))?;
    }
    Ok(config.validated())
}

fn print_user(ctx: &AuthContext) {
    match ctx.user() {
        Some(user) => println!(
            "signed in as {} <{}> ({}), expires in {}s",
            user.name,
            user.email,
            user.sub,
            user.remaining_secs_at(unix_now())
        ),
        None if ctx.is_authenticated() => println!("signed in (token payload unreadable)"),
        None => println!("signed out"),
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(command) = parse_args() else {
        eprintln!("usage: login-cli [status | sign-out | <email> <password>]");
        std::process::exit(2);
    };

    let path = std::env::var("LOGINKIT_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.into());
    let platform = Platform::detect();
    tracing::info!(%platform, store = %path, "starting login demo");

    let store = PlatformStore::select(platform, || FileStore::new(&path), MemoryStore::new);
    let kit = Loginkit::builder()
        .login_config(login_config()?)
        .build(store)
        .await;

    match command {
        Command::Status => print_user(&kit.context()),
        Command::SignOut => {
            kit.sign_out().await?;
            print_user(&kit.context());
        }
        Command::SignIn { email, password } => match kit.submit(&email, &password).await? {
            Submitted::SignedIn(_) => print_user(&kit.context()),
            Submitted::Rejected(reason) => {
                eprintln!("{reason}");
                std::process::exit(1);
            }
            Submitted::Invalid(errors) => {
                for message in [errors.email, errors.password].into_iter().flatten() {
                    eprintln!("{message}");
                }
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
