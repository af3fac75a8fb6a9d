//! Benchmarks for `MmiResource::deliver` dispatch throughput.
//!
//! Covers the three dispatch shapes: a fixed-length object, a single-
//! fragment fragmentable object (the common case, no allocation), and a
//! multi-fragment menu that exercises both the Defragmenter and the Text
//! Defragmenter.
//!
//! Run with:
//! ```sh
//! cargo bench --bench dispatch_bench
//! ```

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use mmi_core::{SessionNumber, SlotId};
use mmi_protocol::{MmiResource, ResourceConfig, SendInterface};

struct DiscardSend;
impl SendInterface for DiscardSend {
    fn send_data(&self, _session: SessionNumber, bytes: &[u8]) -> mmi_core::Result<usize> {
        Ok(bytes.len())
    }
}

fn resource() -> MmiResource {
    MmiResource::new(Arc::new(DiscardSend), ResourceConfig::new())
}

fn bench_close_immediate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));
    let resource = resource();
    let pdu = [0x9F, 0x88, 0x00, 0x01, 0x00];

    group.bench_function("close_immediate", |b| {
        b.iter(|| {
            let result = resource.deliver(SlotId::new(0), SessionNumber::new(1), 0, black_box(&pdu));
            black_box(result).unwrap();
        });
    });
    group.finish();
}

fn bench_single_fragment_menu(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));
    let resource = resource();

    // menu_last, single fragment: choice_nb=0, three empty text_last strings.
    let mut payload = vec![0x00];
    for _ in 0..3 {
        payload.extend_from_slice(&[0x9F, 0x88, 0x03, 0x00]);
    }
    let mut pdu = vec![0x9F, 0x88, 0x09, payload.len() as u8];
    pdu.extend_from_slice(&payload);

    group.bench_function("menu_last_single_fragment", |b| {
        b.iter(|| {
            let result = resource.deliver(SlotId::new(0), SessionNumber::new(1), 0, black_box(&pdu));
            black_box(result).unwrap();
        });
    });
    group.finish();
}

fn bench_fragmented_menu(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));
    let resource = resource();

    let mut more_payload = vec![0x00];
    more_payload.extend_from_slice(&[0x9F, 0x88, 0x03, 0x01, b'A']);
    let mut more_pdu = vec![0x9F, 0x88, 0x0A, more_payload.len() as u8];
    more_pdu.extend_from_slice(&more_payload);

    let mut last_payload = vec![0x9F, 0x88, 0x03, 0x01, b'B'];
    last_payload.extend_from_slice(&[0x9F, 0x88, 0x03, 0x01, b'C']);
    let mut last_pdu = vec![0x9F, 0x88, 0x09, last_payload.len() as u8];
    last_pdu.extend_from_slice(&last_payload);

    group.bench_function("menu_more_then_menu_last", |b| {
        b.iter(|| {
            resource
                .deliver(SlotId::new(0), SessionNumber::new(7), 0, black_box(&more_pdu))
                .unwrap();
            let result = resource.deliver(SlotId::new(0), SessionNumber::new(7), 0, black_box(&last_pdu));
            black_box(result).unwrap();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_close_immediate,
    bench_single_fragment_menu,
    bench_fragmented_menu
);
criterion_main!(benches);
