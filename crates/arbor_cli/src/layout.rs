//! Layout dump

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use arbor_3d::config::ArborConfig;
use arbor_3d::layout::LayoutGenerator;
use arbor_3d::ornament::Category;
use arbor_core::Pose;

#[derive(Debug, Serialize)]
struct LayoutDump {
    category: Category,
    count: usize,
    targets: Vec<Pose>,
    chaos: Vec<Pose>,
}

fn configured_count(config: &ArborConfig, category: Category) -> usize {
    match category {
        Category::Bauble => config.bauble.count,
        Category::GiftBox => config.gift_box.count,
        Category::Photo => config.photo.max_participants,
    }
}

pub fn cmd_layout(
    config: &ArborConfig,
    category: Category,
    count: Option<usize>,
    seed: u64,
) -> Result<()> {
    let count = count.unwrap_or_else(|| configured_count(config, category));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let layout = LayoutGenerator::new(config).generate(count, category, &mut rng);

    let dump = LayoutDump {
        category,
        count,
        targets: layout.targets,
        chaos: layout.chaos,
    };
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}
