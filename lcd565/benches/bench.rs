use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lcd565::{FrameInfo, PixelLayout};

fn synthetic_frame(frame: &FrameInfo) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(frame.input_len());
    for y in 0..frame.height {
        for x in 0..frame.width {
            pixels.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 0xFF]);
        }
    }
    pixels
}

fn convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for frame in [FrameInfo::new(320, 240), FrameInfo::new(480, 320)] {
        let input = synthetic_frame(&frame);
        let frame_name = format!("{}x{}", frame.width, frame.height);

        group.throughput(criterion::Throughput::Elements(frame.pixel_count() as u64));

        for (layout_name, layout) in [
            ("packed_native", PixelLayout::PACKED_NATIVE),
            ("ili_wire", PixelLayout::ILI_WIRE),
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("{layout_name} to_slice"), &frame_name),
                &input,
                |b, input| {
                    let mut output = vec![0; frame.output_len()];
                    b.iter(|| layout.convert_to_slice(input, &mut output))
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{layout_name} to_vec"), &frame_name),
                &input,
                |b, input| b.iter(|| layout.convert(input)),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{layout_name} to_writer"), &frame_name),
                &input,
                |b, input| {
                    let mut output = Vec::with_capacity(frame.output_len());
                    b.iter(|| {
                        output.clear();
                        layout.convert_to_writer(input, &mut output)
                    })
                },
            );
        }
    }
}

criterion_group!(benches, convert);
criterion_main!(benches);
