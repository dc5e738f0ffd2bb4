use criterion::{criterion_group, criterion_main, Criterion};
use mipsim::parser;
use mipsim::report::NullReporter;
use mipsim::simulator::{memory::Memory, Simulator};

const TESTCASES: &[&str] = &["fib.asm", "array_sum.asm", "countdown.asm"];

fn criterion_benchmark(c: &mut Criterion) {
    for testcase in TESTCASES {
        let parsed = parser::tokenize_file(&format!("./benches/samples/{testcase}"))
            .unwrap_or_else(|e| panic!("Couldn't read {testcase}: {e}"));

        c.bench_function(testcase, |b| {
            b.iter(|| {
                let mut simulator = Simulator::default().with_memory(Memory::new());
                simulator.load(parsed.clone());
                simulator.run(&mut NullReporter).unwrap();
                simulator
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
