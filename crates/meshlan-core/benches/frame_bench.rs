use criterion::{Criterion, criterion_group, criterion_main};

use meshlan_core::frame;

fn ipv4_frame(dst: [u8; 4]) -> Vec<u8> {
    let mut p = vec![0u8; 1400];
    p[0] = 0x45;
    let total_len = (p.len() as u16).to_be_bytes();
    p[2] = total_len[0];
    p[3] = total_len[1];
    p[8] = 64;
    p[9] = 17;
    p[12..16].copy_from_slice(&[192, 0, 2, 1]);
    p[16..20].copy_from_slice(&dst);
    p
}

fn ipv6_frame(dst: [u8; 16]) -> Vec<u8> {
    let mut p = vec![0u8; 1400];
    p[0] = 0x60;
    p[4..6].copy_from_slice(&1360u16.to_be_bytes());
    p[6] = 17;
    p[7] = 64;
    p[24..40].copy_from_slice(&dst);
    p
}

fn bench_destination(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_destination");

    let v4 = ipv4_frame([10, 0, 1, 5]);
    group.bench_function("ipv4", |b| {
        b.iter(|| frame::destination(&v4));
    });

    // v6 frames pay for the failed v4 attempt first.
    let mut dst = [0u8; 16];
    dst[0] = 0x20;
    dst[1] = 0x01;
    dst[15] = 0x01;
    let v6 = ipv6_frame(dst);
    group.bench_function("ipv6", |b| {
        b.iter(|| frame::destination(&v6));
    });

    let garbage = vec![0xFFu8; 1400];
    group.bench_function("non_ip", |b| {
        b.iter(|| frame::destination(&garbage));
    });

    group.finish();
}

criterion_group!(benches, bench_destination);
criterion_main!(benches);
