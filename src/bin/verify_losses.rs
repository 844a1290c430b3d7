use std::process::ExitCode;

use loss_verifier::nn::architectures::cpu::Cpu;
use loss_verifier::nn::architectures::reference::Reference;
use loss_verifier::nn::architectures::Architecture;
use loss_verifier::verification::loss_checks::{run_check, LossCheck};
use loss_verifier::verification::verifier_config::VerifierConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> ExitCode {
    let config = match VerifierConfig::from_env() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid configuration: {:?}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Checking loss functions: tests={} seed={} tolerance={:e} f32_tolerance={:e} shape={} ce_gradient_shape={}",
             config.ntests, config.seed, config.tolerance, config.single_precision_tolerance, config.shape,
             config.cross_entropy_gradient_shape);

    let single_precision = VerifierConfig {
        tolerance: config.single_precision_tolerance,
        ..config.clone()
    };
    let failed = verify::<Reference>(&config)
        + verify::<Cpu<f64>>(&config)
        + verify::<Cpu<f32>>(&single_precision);

    if failed == 0 {
        println!("All checks passed");
        ExitCode::SUCCESS
    } else {
        eprintln!("{} check(s) failed", failed);
        ExitCode::FAILURE
    }
}

/// Runs every check against one architecture and returns how many failed
fn verify<A: Architecture>(config: &VerifierConfig) -> usize {
    // Each architecture sees the same trials
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut failed = 0;

    println!("Start {}", A::name());
    for check in LossCheck::ALL {
        match run_check::<A, _>(check, &mut rng, config) {
            Ok(report) if report.passed() => {
                println!("    {} -> max_error={:e}", check, report.max_error);
            }
            Ok(report) => {
                println!("    {} -> max_error={:e} FAILED (tolerance={:e})", check, report.max_error, report.tolerance);
                failed += 1;
            }
            Err(e) => {
                eprintln!("    {} -> {:?}", check, e);
                failed += 1;
            }
        }
    }
    failed
}
