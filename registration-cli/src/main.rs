use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use registration_core::wizard::view::visible_fields;
use registration_core::{RegistrationConfig, RegistrationWizard, WizardState, WizardStep};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "udyam-register", about = "Drive the Udyam registration wizard from the terminal")]
struct Cli {
    #[command(flatten)]
    endpoints: EndpointArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct EndpointArgs {
    /// YAML file with backend_url, postal_lookup_url and timeout_secs.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the registration backend base URL.
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Overrides the PIN code lookup base URL.
    #[arg(long, global = true)]
    postal_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lists the backend's field descriptors by wizard step.
    Fields {
        /// Print the raw descriptors as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Resolves a PIN code to city and state.
    Lookup { pin_code: String },
    /// Fills in both steps and submits.
    Register {
        /// A form value as name=value, e.g. --field aadhaarNumber=123456789012
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// PIN code used to derive city and state.
        #[arg(long)]
        pin: Option<String>,
    },
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

impl EndpointArgs {
    fn resolve(&self) -> Result<RegistrationConfig> {
        let mut config = match &self.config {
            Some(path) => RegistrationConfig::from_yaml_file(path)?,
            None => RegistrationConfig::default(),
        }
        .with_overrides(|key| std::env::var(key).ok())
        .context("invalid registration environment")?;

        if let Some(url) = &self.backend_url {
            config = config.with_backend_url(url.as_str());
        }
        if let Some(url) = &self.postal_url {
            config = config.with_postal_lookup_url(url.as_str());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    run(Cli::parse()).await
}

/// Runs one subcommand; the exit code is a failure whenever the wizard ends on an error.
async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.endpoints.resolve()?;
    tracing::debug!("Using config: {:?}", config);

    let mut wizard = RegistrationWizard::from_config(&config);

    match cli.command {
        Commands::Fields { json } => {
            wizard.initialize().await;
            let state = wizard.state();
            if state.has_error() {
                return Ok(report_failure(state));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&state.fields)?);
            } else {
                print_fields(state);
            }
        }
        Commands::Lookup { pin_code } => {
            if pin_code.chars().count() != 6 {
                bail!("PIN code must be exactly 6 characters, got '{}'", pin_code);
            }

            wizard.on_postal_code_change(pin_code.as_str()).await;
            let state = wizard.state();
            if state.has_error() {
                return Ok(report_failure(state));
            }
            println!("📍 {}: {}, {}", pin_code, state.resolution.city, state.resolution.state);
        }
        Commands::Register { fields, pin } => {
            wizard.initialize().await;
            if wizard.state().has_error() {
                return Ok(report_failure(wizard.state()));
            }

            for (name, value) in fields {
                wizard.on_field_change(name, value);
            }
            if let Some(pin) = pin {
                wizard.on_postal_code_change(pin).await;
                print_status(wizard.state());
                println!(
                    "   City: '{}', State: '{}'",
                    wizard.state().resolution.city,
                    wizard.state().resolution.state
                );
            }

            wizard.advance_to_step2();
            if wizard.state().step != WizardStep::Two {
                return Ok(report_failure(wizard.state()));
            }
            println!("➡️  Step 2 reached");

            wizard.submit().await;
            let state = wizard.state();
            if state.has_error() {
                return Ok(report_failure(state));
            }
            print_status(state);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_fields(state: &WizardState) {
    for step in [WizardStep::One, WizardStep::Two] {
        println!("Step {}:", step.index());
        for field in visible_fields(&state.fields, step) {
            println!(
                "  {:<20} {:<30} {}",
                field.name,
                field.display_label(),
                field.placeholder_text()
            );
        }
    }

    let hidden = state.fields.len()
        - visible_fields(&state.fields, WizardStep::One).len()
        - visible_fields(&state.fields, WizardStep::Two).len();
    if hidden > 0 {
        println!("({} descriptor(s) not shown in either step)", hidden);
    }
}

fn print_status(state: &WizardState) {
    match &state.status {
        Some(status) if status.is_error() => println!("❌ {}", status.text),
        Some(status) => println!("✅ {}", status.text),
        None => {}
    }
}

fn report_failure(state: &WizardState) -> ExitCode {
    print_status(state);
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn register_cli(server: &MockServer, pan: &str) -> Cli {
        let uri = server.uri();
        let pan_field = format!("panNumber={}", pan);
        Cli::try_parse_from([
            "udyam-register",
            "--backend-url",
            uri.as_str(),
            "--postal-url",
            uri.as_str(),
            "register",
            "--field",
            "aadhaarNumber=123456789012",
            "--field",
            "nameAsPerAadhaar=Asha Rao",
            "--field",
            pan_field.as_str(),
            "--pin",
            "110001",
        ])
        .unwrap()
    }

    async fn mount_form_and_pincode(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/form-fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "aadhaarNumber", "label": "Aadhaar Number"},
                {"name": "nameAsPerAadhaar", "label": "Name of Entrepreneur"},
                {"name": "panNumber", "label": "PAN"}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pincode/110001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "Status": "Success",
                "PostOffice": [{"District": "New Delhi", "State": "Delhi"}]
            }])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_register_succeeds() {
        let server = MockServer::start().await;
        mount_form_and_pincode(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
            .expect(1)
            .mount(&server)
            .await;

        let code = run(register_cli(&server, "ABCDE1234F")).await.unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_pan_without_posting() {
        let server = MockServer::start().await;
        mount_form_and_pincode(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let code = run(register_cli(&server, "ABCDE123F")).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn test_register_fails_when_fields_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/form-fields"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let code = run(register_cli(&server, "ABCDE1234F")).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn test_register_fails_when_submission_rejected() {
        let server = MockServer::start().await;
        mount_form_and_pincode(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(422))
            .expect(1)
            .mount(&server)
            .await;

        let code = run(register_cli(&server, "ABCDE1234F")).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("panNumber=ABCDE1234F").unwrap(),
            ("panNumber".to_string(), "ABCDE1234F".to_string())
        );
        assert_eq!(
            parse_field("nameAsPerAadhaar=Asha = Rao").unwrap().1,
            "Asha = Rao"
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_cli_parses_register() {
        let cli = Cli::try_parse_from([
            "udyam-register",
            "--backend-url",
            "http://backend.test",
            "register",
            "--field",
            "aadhaarNumber=123456789012",
            "--field",
            "panNumber=ABCDE1234F",
            "--pin",
            "110001",
        ])
        .unwrap();

        assert_eq!(cli.endpoints.backend_url.as_deref(), Some("http://backend.test"));
        match cli.command {
            Commands::Register { fields, pin } => {
                assert_eq!(fields.len(), 2);
                assert_eq!(pin.as_deref(), Some("110001"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_flags_override_config() {
        let args = EndpointArgs {
            config: None,
            backend_url: Some("http://override.test/".to_string()),
            postal_url: None,
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.backend_url, "http://override.test");
    }
}
