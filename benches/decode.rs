extern crate methodscope;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use methodscope::{
    formatter, hex,
    metadata::{
        label::{CodeRange, Label},
        method::{reconstruct, ExceptionHandler, HandlerKind, MethodData},
    },
};
use std::hint::black_box;

/// A plausible instruction mix: loads, arithmetic, a wide constant, a call
/// shaped token and a short branch, repeated until `size` bytes are filled.
/// The pattern is 20 bytes long, so every multiple of 20 is an instruction
/// boundary.
fn synthetic_il(size: usize) -> Vec<u8> {
    const PATTERN: &[u8] = &[
        0x00, // nop
        0x02, // ldarg.0
        0x03, // ldarg.1
        0x58, // add
        0x0A, // stloc.0
        0x06, // ldloc.0
        0x20, 0x40, 0x00, 0x00, 0x00, // ldc.i4 0x40
        0x58, // add
        0x28, 0x10, 0x00, 0x00, 0x0A, // call 0A000010
        0x2B, 0x00, // br.s to the next instruction
        0x26, // pop
    ];

    let mut code = Vec::with_capacity(size);
    while code.len() + PATTERN.len() <= size {
        code.extend_from_slice(PATTERN);
    }
    while code.len() < size {
        code.push(0x00);
    }
    code
}

fn fat_body(code: &[u8], sections: &[u8]) -> Vec<u8> {
    let flags: u16 = if sections.is_empty() { 0x3003 } else { 0x300B };

    let mut body = Vec::new();
    body.extend_from_slice(&flags.to_le_bytes());
    body.extend_from_slice(&8_u16.to_le_bytes());
    body.extend_from_slice(&i32::try_from(code.len()).unwrap().to_le_bytes());
    body.extend_from_slice(&0_u32.to_le_bytes());
    body.extend_from_slice(code);

    while body.len() % 4 != 0 {
        body.push(0);
    }
    body.extend_from_slice(sections);
    body
}

/// Four finally clauses nested around the first 100 bytes of code, with all
/// boundaries on the 20 byte pattern grid.
fn nested_handlers() -> Vec<ExceptionHandler> {
    (0..4)
        .map(|level| {
            let end = (level + 1) * 20;
            ExceptionHandler::new(
                HandlerKind::Finally,
                CodeRange::new(Label(0), end),
                CodeRange::new(Label(end), 20),
                0,
            )
        })
        .collect()
}

fn fat_eh_section(handlers: &[ExceptionHandler]) -> Vec<u8> {
    let data_size = u32::try_from(handlers.len() * 24 + 4).unwrap();
    let mut section = ((data_size << 8) | 0x41).to_le_bytes().to_vec();

    for handler in handlers {
        section.extend_from_slice(&2_u32.to_le_bytes());
        section.extend_from_slice(&handler.try_range.offset.0.to_le_bytes());
        section.extend_from_slice(&handler.try_range.length.to_le_bytes());
        section.extend_from_slice(&handler.handler_range.offset.0.to_le_bytes());
        section.extend_from_slice(&handler.handler_range.length.to_le_bytes());
        section.extend_from_slice(&handler.filter_or_type.to_le_bytes());
    }
    section
}

/// Benchmark raw instruction decoding over a 4 KiB synthetic stream.
fn bench_decode(c: &mut Criterion) {
    let code = synthetic_il(4096);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(code.len() as u64));
    group.bench_function("from_il", |b| {
        b.iter(|| black_box(MethodData::from_il(black_box(&code))));
    });
    group.finish();
}

/// Benchmark full body parsing: fat header, code and exception sections.
fn bench_parse_body(c: &mut Criterion) {
    let code = synthetic_il(4096);
    let body = fat_body(&code, &fat_eh_section(&nested_handlers()));

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("from_body", |b| {
        b.iter(|| black_box(MethodData::from_body(black_box(&body))));
    });
    group.finish();
}

/// Benchmark rebuilding the nested section tree from the flat clause table.
fn bench_reconstruct(c: &mut Criterion) {
    let handlers = nested_handlers();
    let range = CodeRange::new(Label(0), 4096);

    c.bench_function("reconstruct", |b| {
        b.iter(|| black_box(reconstruct(black_box(range), black_box(&handlers))));
    });
}

/// Benchmark both listing renderers over the parsed 4 KiB body.
fn bench_render(c: &mut Criterion) {
    let code = synthetic_il(4096);
    let body = fat_body(&code, &fat_eh_section(&nested_handlers()));
    let method = MethodData::from_body(&body).unwrap();

    let mut group = c.benchmark_group("render");
    group.bench_function("format", |b| {
        b.iter(|| black_box(formatter::format(black_box(&method))));
    });
    group.bench_function("format_structured", |b| {
        b.iter(|| black_box(formatter::format_structured(black_box(&method))));
    });
    group.finish();
}

/// Benchmark the hex text codec in both directions.
fn bench_hex(c: &mut Criterion) {
    let code = synthetic_il(4096);
    let body = fat_body(&code, &fat_eh_section(&nested_handlers()));
    let dump = hex::format(&body);

    let mut group = c.benchmark_group("hex");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("parse", |b| {
        b.iter(|| black_box(hex::parse(black_box(&dump))));
    });
    group.bench_function("format", |b| {
        b.iter(|| black_box(hex::format(black_box(&body))));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_parse_body,
    bench_reconstruct,
    bench_render,
    bench_hex
);
criterion_main!(benches);
