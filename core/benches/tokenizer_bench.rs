use criterion::{criterion_group, criterion_main, Criterion};
use tweetrank::Tokenizer;

const TWEET: &str = "Health officials reported 1,204 new #COVID19 cases today; the risk of community \
    transmission remains high. Wash your hands, wear a mask and keep your distance! @WHO";

fn bench_normalize(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let text = TWEET.repeat(20);
    c.bench_function("normalize_tweets", |b| b.iter(|| tokenizer.normalize(&text)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
