use ndarray::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use tilescramble::*;

/// Image where every pixel holds a distinct value.
fn numbered(rows: usize, cols: usize, ch: usize) -> Array3<u16> {
    Array3::from_shape_fn((rows, cols, ch), |(r, c, k)| ((r * cols + c) * ch + k) as u16)
}

fn rng(seed: u64) -> Xoshiro256StarStar {
    Xoshiro256StarStar::seed_from_u64(seed)
}

#[test]
fn grid_9_policy_all() {
    let image = numbered(90, 90, 3);
    let scrambler = Scrambler::new(
        ConfigBuilder::new()
            .grid_size(9)
            .policy(SelectionPolicy::All)
            .build(),
    );
    let (out, report) = scrambler
        .scramble_with_report(image.view(), &mut rng(1))
        .unwrap();

    assert_eq!(out.dim(), image.dim());
    assert_eq!(report.retained(), 81);
    assert_eq!(report.grid.row_boundaries(), [1, 10, 19, 28, 37, 46, 55, 64, 73, 82]);
    assert_eq!(report.grid.col_boundaries(), report.grid.row_boundaries());

    // Margin: row/column 0 and everything from 82 on
    for i in std::iter::once(0).chain(82..90) {
        assert_eq!(out.slice(s![i, .., ..]), image.slice(s![i, .., ..]));
        assert_eq!(out.slice(s![.., i, ..]), image.slice(s![.., i, ..]));
    }

    // Not every tile stays home
    assert!(report.moved() > 0);
}

#[test]
fn rearrangement_preserves_tiles() {
    let image = numbered(73, 64, 2);
    let scrambler = Scrambler::new(
        ConfigBuilder::new()
            .grid_size(6)
            .policy(SelectionPolicy::All)
            .rotate(false)
            .build(),
    );
    let (out, report) = scrambler
        .scramble_with_report(image.view(), &mut rng(2))
        .unwrap();
    let grid = &report.grid;

    let tiles_of = |arr: &Array3<u16>| {
        let mut tiles: Vec<Vec<u16>> = grid
            .cells()
            .map(|cell| {
                let (rows, cols) = grid.span(cell);
                arr.slice(s![rows, cols, ..]).iter().copied().collect()
            })
            .collect();
        tiles.sort();
        tiles
    };
    assert_eq!(tiles_of(&out), tiles_of(&image));
}

#[test]
fn rotation_is_right_angle_and_zero_is_identity() {
    let image = numbered(61, 61, 1);
    let scrambler = Scrambler::new(
        ConfigBuilder::new()
            .grid_size(8)
            .policy(SelectionPolicy::All)
            .build(),
    );
    let (out, report) = scrambler
        .scramble_with_report(image.view(), &mut rng(3))
        .unwrap();
    let grid = &report.grid;

    let mut seen_zero = false;
    for p in &report.placements {
        assert!([0, 90, 180, 270].contains(&p.rotation.degrees()));

        let (sr, sc) = grid.span(p.source);
        let (dr, dc) = grid.span(p.destination);
        let src = image.slice(s![sr, sc, ..]);
        let dst = out.slice(s![dr, dc, ..]);
        if p.rotation == Rotation::R0 {
            seen_zero = true;
            assert_eq!(dst, src);
        }
        // Undoing the rotation recovers the source tile exactly
        assert_eq!(rotate(dst, p.rotation.inverse()), src);
    }
    assert!(seen_zero);
}

#[test]
fn nonzero_keeps_background_tile() {
    let mut image = Array3::from_shape_fn((90, 90, 3), |(r, c, k)| ((r + 2 * c + k) % 150) as u8);
    let grid = Grid::new((90, 90), 9).unwrap();
    let white = Cell::new(4, 6);
    let (rows, cols) = grid.span(white);
    image.slice_mut(s![rows.clone(), cols.clone(), ..]).fill(255);

    let scrambler = Scrambler::new(ConfigBuilder::new().grid_size(9).build());
    for seed in 0..5 {
        let (out, report) = scrambler
            .scramble_with_report(image.view(), &mut rng(seed))
            .unwrap();

        assert_eq!(report.retained(), 80);
        assert!(report
            .placements
            .iter()
            .all(|p| p.source != white && p.destination != white));
        assert_eq!(
            out.slice(s![rows.clone(), cols.clone(), ..]),
            image.slice(s![rows.clone(), cols.clone(), ..]),
        );
        assert_eq!(out.slice(s![82.., .., ..]), image.slice(s![82.., .., ..]));
        assert_eq!(out.slice(s![.., 82.., ..]), image.slice(s![.., 82.., ..]));
    }
}

#[test]
fn nonzero_background_everywhere() {
    // Light image: nothing is retained, output equals input.
    let image = Array3::<u8>::from_elem((50, 40, 3), 230);
    let scrambler = Scrambler::new(ConfigBuilder::new().grid_size(4).build());
    let (out, report) = scrambler
        .scramble_with_report(image.view(), &mut rng(4))
        .unwrap();
    assert_eq!(report.retained(), 0);
    assert_eq!(out, image);

    // Lower threshold also keeps moderately dark tiles in place.
    let image = Array3::<u8>::from_elem((50, 40, 3), 120);
    let scrambler = Scrambler::new(ConfigBuilder::new().grid_size(4).threshold(100.0).build());
    let (_, report) = scrambler
        .scramble_with_report(image.view(), &mut rng(4))
        .unwrap();
    assert_eq!(report.retained(), 0);
}

#[test]
fn grid_1_single_tile() {
    let image = numbered(21, 21, 3);
    let scrambler = Scrambler::new(
        ConfigBuilder::new()
            .grid_size(1)
            .policy(SelectionPolicy::All)
            .build(),
    );
    let (out, report) = scrambler
        .scramble_with_report(image.view(), &mut rng(5))
        .unwrap();

    assert_eq!(report.retained(), 1);
    let p = report.placements[0];
    assert_eq!(p.source, Cell::new(0, 0));
    assert_eq!(p.destination, Cell::new(0, 0));

    let inner = image.slice(s![1..21, 1..21, ..]);
    assert_eq!(out.slice(s![1..21, 1..21, ..]), rotate(inner, p.rotation));
    assert_eq!(out.slice(s![0, .., ..]), image.slice(s![0, .., ..]));
    assert_eq!(out.slice(s![.., 0, ..]), image.slice(s![.., 0, ..]));
}

#[test]
fn f32_samples() {
    // Float samples are scaled by 255 before the threshold test: 0.8 -> 204
    // is background, 0.7 -> 178.5 is not.
    let mut image = Array3::<f32>::from_elem((40, 40, 3), 0.8);
    let grid = Grid::new((40, 40), 3).unwrap();
    let dark = [Cell::new(0, 1), Cell::new(2, 2)];
    for cell in dark {
        let (rows, cols) = grid.span(cell);
        image.slice_mut(s![rows, cols, ..]).fill(0.7);
    }

    let scrambler = Scrambler::new(ConfigBuilder::new().grid_size(3).build());
    let (out, report) = scrambler
        .scramble_with_report(image.view(), &mut rng(6))
        .unwrap();

    assert_eq!(out.dim(), image.dim());
    assert_eq!(report.retained(), 2);
    assert!(report
        .placements
        .iter()
        .all(|p| dark.contains(&p.source) && dark.contains(&p.destination)));
    // Dark tiles only trade places with each other
    for cell in grid.cells().filter(|c| !dark.contains(c)) {
        let (rows, cols) = grid.span(cell);
        assert_eq!(
            out.slice(s![rows.clone(), cols.clone(), ..]),
            image.slice(s![rows, cols, ..]),
        );
    }
}
