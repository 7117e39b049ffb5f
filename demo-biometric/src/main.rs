//! Console host for the biometric bridge, backed by the simulated device.
//!
//! Usage: `demo-biometric [method] [json-arguments]`. Without arguments it
//! walks through every method once.

mod console;

use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biometric_bridge::{BiometricAuth, MethodCall, SimulatedPlatform, handle_method_call};

use console::ConsolePresenter;

fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("biometric_bridge=debug,{}=debug,info", app_name).into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("You can change verbosity with the RUST_LOG environment variable.");
}

fn tour() -> Vec<MethodCall> {
    vec![
        MethodCall::new("isAvailable", Value::Null),
        MethodCall::new("isEnrolled", Value::Null),
        MethodCall::new("getAvailableBiometricTypes", Value::Null),
        MethodCall::new("getCapability", Value::Null),
        MethodCall::new(
            "authenticate",
            json!({
                "biometricType": "fingerprint",
                "reason": "Confirm the demo payment",
                "title": "Demo shop",
                "confirmText": "Pay",
                "useCustomUI": true
            }),
        ),
    ]
}

fn calls_from_args() -> Result<Vec<MethodCall>, Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(method) = args.next() else {
        return Ok(tour());
    };
    let arguments = match args.next() {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Value::Null,
    };
    Ok(vec![MethodCall::new(method, arguments)])
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_biometric");
    biometric_bridge::init();

    let auth = BiometricAuth::new(SimulatedPlatform::from_env()).with_presenter(ConsolePresenter);

    for call in calls_from_args()? {
        let method = call.method.clone();
        match handle_method_call(&auth, call).await {
            Ok(value) => println!("{method} -> {value}"),
            Err(e) => println!("{method} -> error {}", serde_json::to_string(&e)?),
        }
    }
    Ok(())
}
