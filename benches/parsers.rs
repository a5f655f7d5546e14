use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use parver::{parse, PostTag, PreTag, Version};
use regex::{Captures, Regex};

const INPUT_S: &str = "1.0";
const INPUT_XL: &str = "  v1!2.3.4-RC_1.post2.dev3+ubuntu.1.7aedf  ";

const PEP_440_PATTERN: &str = r"(?i)^\s*v?(?:(?:(?P<epoch>[0-9]+)!)?(?P<release>[0-9]+(?:\.[0-9]+)*)(?P<pre>[-_\.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_\.]?(?P<pre_n>[0-9]+)?)?(?P<post>(?:-(?P<post_n1>[0-9]+))|(?:[-_\.]?(?P<post_l>post|rev|r)[-_\.]?(?P<post_n2>[0-9]+)?))?(?P<dev>[-_\.]?(?P<dev_l>dev)[-_\.]?(?P<dev_n>[0-9]+)?)?)(?:\+(?P<local>[a-z0-9]+(?:[-_\.][a-z0-9]+)*))?\s*$";

fn number(caps: &Captures<'_>, name: &str) -> u64 {
    caps.name(name).map_or(0, |n| n.as_str().parse().unwrap())
}

fn regex_parser(re: &Regex, input: &str) -> Option<Version> {
    let caps = re.captures(input)?;

    let release = caps
        .name("release")?
        .as_str()
        .split('.')
        .map(|n| n.parse().unwrap())
        .collect::<Vec<u64>>();
    let mut builder = Version::builder().release(release);

    if caps.name("epoch").is_some() {
        builder = builder.epoch(number(&caps, "epoch"));
    }
    if let Some(tag) = caps.name("pre_l") {
        let tag = tag.as_str().parse::<PreTag>().unwrap().normalize();
        builder = builder.pre_tag(tag).pre(number(&caps, "pre_n"));
    }
    if caps.name("post_n1").is_some() {
        builder = builder.post(number(&caps, "post_n1")).post_tag(None);
    } else if caps.name("post").is_some() {
        builder = builder
            .post(number(&caps, "post_n2"))
            .post_tag(Some(PostTag::Post));
    }
    if caps.name("dev").is_some() {
        builder = builder.dev(number(&caps, "dev_n"));
    }
    if let Some(local) = caps.name("local") {
        builder = builder.local(local.as_str());
    }

    builder.build().ok()
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parser");
    let re = Regex::new(PEP_440_PATTERN).unwrap();

    for &input in [INPUT_S, INPUT_XL].iter() {
        let permissive = BenchmarkId::new("permissive_parser", input);
        group.bench_with_input(permissive, input, |b, input| {
            b.iter(|| parse(black_box(input), false).unwrap())
        });

        let regex = BenchmarkId::new("regex_parser", input);
        group.bench_with_input(regex, &(input, &re), |b, (input, re)| {
            b.iter(|| regex_parser(re, black_box(input)).unwrap())
        });
    }

    let strict = BenchmarkId::new("strict_parser", INPUT_S);
    group.bench_with_input(strict, INPUT_S, |b, input| {
        b.iter(|| parse(black_box(input), true).unwrap())
    });

    let input = parse(INPUT_XL, false).unwrap().normalize().to_string();
    let strict = BenchmarkId::new("strict_parser", &input);
    group.bench_with_input(strict, input.as_str(), |b, input| {
        b.iter(|| parse(black_box(input), true).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
