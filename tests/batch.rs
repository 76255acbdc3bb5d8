//! Batch driver integration tests.

mod support;

use post_transform::buffer::{
    floats_from_vertices, primitives_from_floats_mut, vertices_from_floats,
};
use post_transform::{
    classify, process, process_with, project, BatchConfig, BatchStats, ClipStatus,
    TransformError, Viewport,
};
use support::vertices::{group, mixed_vertices};

fn eager() -> BatchConfig {
    BatchConfig {
        parallel_threshold: 1,
        chunk_size: 37,
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let vp = Viewport::new(0.0, 0.0, 1280.0, 720.0);
    let source = group::<3>(&mixed_vertices(30_000, 1));

    let mut seq = source.clone();
    let mut seq_status = vec![ClipStatus::NotVisible; seq.len()];
    let seq_stats = process_with(&mut seq, &vp, &mut seq_status, &BatchConfig::sequential())
        .expect("sequential batch");

    let mut par = source.clone();
    let mut par_status = vec![ClipStatus::NotVisible; par.len()];
    let par_stats = process_with(&mut par, &vp, &mut par_status, &eager()).expect("eager batch");

    assert_eq!(seq_stats, par_stats);
    assert_eq!(seq_status, par_status);
    assert_eq!(seq, par);
}

#[test]
fn test_stats_match_classification() {
    let vp = Viewport::from_size(640.0, 480.0);
    let source = group::<2>(&mixed_vertices(8000, 2));

    let mut expected = BatchStats::default();
    for line in &source {
        expected.record(classify(line));
    }

    let mut lines = source.clone();
    let mut statuses = vec![ClipStatus::NotVisible; lines.len()];
    let stats = process(&mut lines, &vp, &mut statuses).expect("batch");

    assert_eq!(stats, expected);
    assert_eq!(stats.total(), source.len());
    for (line, status) in source.iter().zip(statuses.iter()) {
        assert_eq!(classify(line), *status);
    }
}

#[test]
fn test_only_fully_visible_projected() {
    let vp = Viewport::new(10.0, 20.0, 300.0, 200.0);
    let source = group::<3>(&mixed_vertices(9000, 3));

    let mut tris = source.clone();
    let mut statuses = vec![ClipStatus::NotVisible; tris.len()];
    process_with(&mut tris, &vp, &mut statuses, &eager()).expect("batch");

    let mut projected = 0;
    for ((out, orig), status) in tris.iter().zip(source.iter()).zip(statuses.iter()) {
        if *status == ClipStatus::FullyVisible {
            let mut want = *orig;
            project(&mut want, &vp);
            assert_eq!(*out, want);
            projected += 1;
        } else {
            // Left in clip space, bit for bit.
            for (a, b) in out.iter().zip(orig.iter()) {
                assert_eq!(a.to_array().map(f32::to_bits), b.to_array().map(f32::to_bits));
            }
        }
    }
    assert!(projected > 0, "seed produced no fully visible triangles");
}

#[test]
fn test_points_never_negative_after_batch() {
    let vp = Viewport::new(-50.0, -50.0, 100.0, 100.0);
    let mut points = group::<1>(&mixed_vertices(5000, 4));
    let mut statuses = vec![ClipStatus::NotVisible; points.len()];
    process(&mut points, &vp, &mut statuses).expect("batch");

    for (p, s) in points.iter().zip(statuses.iter()) {
        if *s == ClipStatus::FullyVisible {
            assert!(p[0].x >= 0.0 && p[0].y >= 0.0, "{:?}", p);
        }
    }
}

#[test]
fn test_batch_over_float_buffer() {
    let mut floats: Vec<f32> = vec![
        // Triangle 0, fully visible.
        0.0, 0.0, 0.0, 1.0, //
        0.25, 0.0, 0.0, 2.0, //
        0.0, -0.25, 0.0, 2.0, //
        // Triangle 1, behind the eye.
        0.0, 0.0, 0.0, -1.0, //
        0.0, 0.0, 0.0, -1.0, //
        0.0, 0.0, 0.0, -1.0,
    ];
    let vp = Viewport::from_size(100.0, 100.0);

    let tris = primitives_from_floats_mut::<3>(&mut floats).expect("aligned buffer");
    let mut statuses = [ClipStatus::NotVisible; 2];
    let stats = process(tris, &vp, &mut statuses).expect("batch");

    assert_eq!(statuses, [ClipStatus::FullyVisible, ClipStatus::NotVisible]);
    assert_eq!(stats.fully_visible, 1);
    assert_eq!(stats.not_visible, 1);

    // 0.25 / 2 = 0.125 -> 1.125 * 50 = 56.25; -0.125 -> 0.875 * 50 = 43.75
    assert_eq!(&floats[0..2], &[50.0, 50.0]);
    assert_eq!(&floats[4..6], &[56.0, 50.0]);
    assert_eq!(&floats[8..10], &[50.0, 43.0]);
    assert_eq!(&floats[12..], &[0.0f32, 0.0, 0.0, -1.0].repeat(3)[..]);

    let verts = vertices_from_floats(&floats).expect("aligned buffer");
    assert_eq!(verts.len(), 6);
    assert!((verts[1].w - 0.5).abs() < 1e-6);
    assert_eq!(floats_from_vertices(verts), &floats[..]);
}

#[test]
fn test_misaligned_buffer_rejected() {
    let mut floats = vec![0.0f32; 10];
    let err = primitives_from_floats_mut::<2>(&mut floats).unwrap_err();
    assert_eq!(err, TransformError::MisalignedBuffer { len: 10, stride: 8 });
}
