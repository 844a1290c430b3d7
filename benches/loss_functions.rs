use loss_verifier::nn::architectures::cpu::Cpu;
use loss_verifier::nn::architectures::reference::Reference;
use loss_verifier::nn::architectures::Architecture;
use loss_verifier::nn::loss::loss_func::LossFunc;
use loss_verifier::utils::Array2F;
use loss_verifier::verification::loss_checks::check_mean_squared_error;
use loss_verifier::verification::trial_shape::TrialShape;
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use criterion::*;

fn criterion_benchmark(c: &mut Criterion) {
    let dist = Normal::new(0.0, 1.0).unwrap();
    let target = Array2F::random((256, 256), dist);
    let output = Array2F::random((256, 256), dist);

    c.bench_function("reference cross entropy 256x256", |b| b.iter(|| {
        Reference::evaluate(&LossFunc::CrossEntropy, &target, &output).unwrap()
    }));

    c.bench_function("cpu cross entropy 256x256", |b| b.iter(|| {
        Cpu::<f64>::evaluate(&LossFunc::CrossEntropy, &target, &output).unwrap()
    }));

    c.bench_function("reference cross entropy gradients 256x256", |b| b.iter(|| {
        let mut grad = Array2F::zeros((256, 256));
        Reference::evaluate_gradients(&mut grad, &LossFunc::CrossEntropy, &target, &output).unwrap();
        grad
    }));

    c.bench_function("cpu cross entropy gradients 256x256", |b| b.iter(|| {
        let mut grad = Array2F::zeros((256, 256));
        Cpu::<f64>::evaluate_gradients(&mut grad, &LossFunc::CrossEntropy, &target, &output).unwrap();
        grad
    }));

    let shape = TrialShape::random(100).unwrap();
    c.bench_function("check mean squared error x10", |b| b.iter(|| {
        let mut rng = StdRng::seed_from_u64(777);
        check_mean_squared_error::<Cpu<f64>, _>(&mut rng, 10, &shape).unwrap()
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
