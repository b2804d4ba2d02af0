//! End-to-end detection scenarios on small hand-built grids and images.

use ndarray::Array2;
use objscan::image_proc::detection::{BoundingBox, Shape};
use objscan::image_proc::grid::{BinaryGrid, Cell};
use objscan::image_proc::image::array2_to_gray_image;
use objscan::image_proc::render::{render_boundaries, render_objects, OutlinePolicy, RenderConfig};
use objscan::image_proc::segment::{
    analyze_gray_image, analyze_grayscale, detect_boundaries, detect_objects, AnalysisConfig,
};
use objscan::image_proc::thresholding::ThresholdPolicy;
use objscan::image_proc::DetectionConfig;
use test_helpers::grids::{filled_disk, filled_rect, l_shape, mask_from_ascii};
use test_helpers::output_path;

const RED: [u8; 3] = [255, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn grid(mask: Array2<bool>) -> BinaryGrid {
    BinaryGrid::new(mask).expect("fixture grid should be valid")
}

fn union(mut a: Array2<bool>, b: &Array2<bool>) -> Array2<bool> {
    a.zip_mut_with(b, |x, &y| *x |= y);
    a
}

#[test]
fn test_square_on_5x5_is_rectangle() {
    init_logging();
    let report = detect_objects(&grid(filled_rect(5, 5, 1, 1, 3, 3)), &DetectionConfig::default());

    assert_eq!(report.len(), 1);
    let object = &report.objects[0];
    assert_eq!(object.region.pixel_count, 9);
    assert_eq!(object.region.bbox, BoundingBox::from_coords(1, 3, 1, 3));
    assert_eq!(object.shape, Shape::Rectangle);
    assert_eq!(report.to_string(), "Object 1: RECTANGLE\n");
}

#[test]
fn test_disk_on_20x20_is_circle() {
    init_logging();
    let report = detect_objects(&grid(filled_disk(20, 20, 10, 10, 5)), &DetectionConfig::default());

    assert_eq!(report.len(), 1);
    let object = &report.objects[0];
    assert_eq!(object.region.pixel_count, 81);
    assert_eq!(object.region.bbox, BoundingBox::from_coords(5, 15, 5, 15));
    assert!(object.region.bbox.is_square());
    assert_eq!(object.shape, Shape::Circle);
}

#[test]
fn test_blank_grid_has_no_objects() {
    init_logging();
    let blank = grid(Array2::from_elem((10, 10), false));

    let report = detect_objects(&blank, &DetectionConfig::default());
    assert!(report.is_empty());
    assert_eq!(report.to_string(), "No object detected\n");

    let boundaries = detect_boundaries(&blank, &DetectionConfig::default());
    assert!(boundaries.is_empty());
    assert_eq!(boundaries.to_string(), "Total objects detected = 0\n");
}

#[test]
fn test_l_shape_is_unknown() {
    init_logging();
    let report = detect_objects(&grid(l_shape(10, 10, 1, 1, 6, 1)), &DetectionConfig::default());

    assert_eq!(report.len(), 1);
    assert_eq!(report.objects[0].region.pixel_count, 11);
    assert_eq!(report.objects[0].shape, Shape::Unknown);
    assert_eq!(report.to_string(), "Object 1: UNKNOWN\n");
}

#[test]
fn test_block_filling_grid_is_not_rectangle() {
    init_logging();
    let report = detect_objects(&grid(Array2::from_elem((4, 6), true)), &DetectionConfig::default());

    assert_eq!(report.len(), 1);
    assert_eq!(report.objects[0].region.pixel_count, 24);
    assert_eq!(report.objects[0].shape, Shape::Unknown);
}

#[test]
fn test_full_square_grid_falls_through_to_circle_test() {
    // 25 cells against a disk area of ~19.6 is inside the 35% tolerance.
    let report = detect_objects(&grid(Array2::from_elem((5, 5), true)), &DetectionConfig::default());
    assert_eq!(report.shapes(), vec![Shape::Circle]);
}

#[test]
fn test_two_blobs_in_seed_order() {
    init_logging();
    let mask = mask_from_ascii(
        "
        ......##
        ......##
        ........
        ##......
        ###.....
        ",
    );
    let report = detect_objects(&grid(mask), &DetectionConfig::default());

    assert_eq!(report.len(), 2);
    assert_eq!(report.objects[0].region.seed, Cell::new(0, 6));
    assert_eq!(report.objects[0].shape, Shape::Rectangle);
    assert_eq!(report.objects[1].region.seed, Cell::new(3, 0));
    assert_eq!(report.objects[1].region.pixel_count, 5);
    assert_eq!(report.objects[1].shape, Shape::Unknown);
    assert_eq!(report.to_string(), "Object 1: RECTANGLE\nObject 2: UNKNOWN\n");
}

#[test]
fn test_boundary_report_text() {
    init_logging();
    let grid = BinaryGrid::from_rows(&[[1u8, 1, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
    let report = detect_boundaries(&grid, &DetectionConfig::default());

    assert_eq!(
        report.to_string(),
        "Object 1\nArea: 4\n\nBoundary pixels: (0,1) (1,1) (1,0) (0,0) \n\nTotal objects detected = 1\n"
    );
    assert_eq!(report.regions[0].shape, Shape::Rectangle);
}

#[test]
fn test_boundary_mode_matches_flood_fill_on_scenes() {
    let scene = union(filled_rect(12, 12, 1, 1, 3, 3), &filled_disk(12, 12, 8, 8, 3));
    let grid = grid(scene);

    let objects = detect_objects(&grid, &DetectionConfig::default());
    let boundaries = detect_boundaries(&grid, &DetectionConfig::default());

    assert_eq!(objects.len(), boundaries.total());
    for (object, region) in objects.objects.iter().zip(&boundaries.regions) {
        assert_eq!(object.region.pixel_count, region.area());
        assert_eq!(object.region.bbox, region.trace.bbox);
        assert_eq!(object.shape, region.shape);
    }
}

#[test]
fn test_render_overlays() {
    init_logging();
    let scene = union(filled_rect(10, 10, 1, 1, 3, 3), &l_shape(10, 10, 4, 5, 5, 1));
    let grid = grid(scene);
    let config = RenderConfig::default();

    let objects = detect_objects(&grid, &DetectionConfig::default());
    assert_eq!(objects.shapes(), vec![Shape::Rectangle, Shape::Unknown]);

    // Bounding-box mode outlines everything by default.
    let all = render_objects(&objects, &config).unwrap();
    assert_eq!(all.dimensions(), (201, 201));
    assert_eq!(all.get_pixel(50, 20).0, RED);
    assert_eq!(all.get_pixel(150, 80).0, RED);
    all.save(output_path("scenario_objects.png")).unwrap();

    let classified_only = RenderConfig {
        outline: OutlinePolicy::ClassifiedOnly,
        ..config.clone()
    };
    let filtered = render_objects(&objects, &classified_only).unwrap();
    assert_eq!(filtered.get_pixel(50, 20).0, RED);
    assert_eq!(filtered.get_pixel(150, 80).0, WHITE);

    // Boundary mode never outlines unknown shapes.
    let boundaries = detect_boundaries(&grid, &DetectionConfig::default());
    let traced = render_boundaries(
        &boundaries,
        &RenderConfig {
            boundary_color: Some([0, 0, 255]),
            ..config
        },
    )
    .unwrap();
    assert_eq!(traced.get_pixel(50, 20).0, RED);
    assert_eq!(traced.get_pixel(150, 80).0, WHITE);
    // Interior cell (2, 2) is not painted, boundary cell (4, 5) is.
    assert_eq!(traced.get_pixel(50, 50).0, WHITE);
    assert_eq!(traced.get_pixel(110, 90).0, [0, 0, 255]);
    traced.save(output_path("scenario_boundaries.png")).unwrap();
}

fn dark_shapes_image() -> Array2<u8> {
    let shapes = union(filled_rect(20, 20, 1, 12, 3, 6), &filled_disk(20, 20, 12, 6, 4));
    shapes.mapv(|fg| if fg { 30 } else { 230 })
}

#[test]
fn test_grayscale_pipeline() {
    init_logging();
    let image = dark_shapes_image();

    let report = analyze_grayscale(image.view(), &AnalysisConfig::default()).unwrap();
    assert_eq!(report.shapes(), vec![Shape::Rectangle, Shape::Circle]);

    let otsu = AnalysisConfig {
        threshold: ThresholdPolicy::Otsu,
        ..Default::default()
    };
    assert_eq!(analyze_grayscale(image.view(), &otsu).unwrap(), report);

    let from_image = analyze_gray_image(&array2_to_gray_image(&image), &otsu).unwrap();
    assert_eq!(from_image, report);
}

#[test]
fn test_grayscale_pipeline_from_json_config() {
    let config = AnalysisConfig::from_json_str(
        r#"{
            "threshold": { "kind": "not_white", "max_value": 230 },
            "detection": { "traversal": "breadth_first" }
        }"#,
    )
    .unwrap();

    let report = analyze_grayscale(dark_shapes_image().view(), &config).unwrap();
    assert_eq!(report.shapes(), vec![Shape::Rectangle, Shape::Circle]);
    assert_eq!(report.objects[1].region.pixel_count, 49);
}
