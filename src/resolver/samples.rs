//! Bundled sample photos shown in the picker grid.

/// A bundled sample image.
#[derive(Debug)]
pub struct Sample {
    pub name: &'static str,
    pub description: &'static str,
    pub(crate) bytes: &'static [u8],
}

static SAMPLES: [Sample; 6] = [
    Sample {
        name: "bear",
        description: "Kodiak brown bear",
        bytes: include_bytes!("../../assets/samples/bear.png"),
    },
    Sample {
        name: "flower",
        description: "Semi-double camellia",
        bytes: include_bytes!("../../assets/samples/flower.png"),
    },
    Sample {
        name: "stone",
        description: "Granite boulder",
        bytes: include_bytes!("../../assets/samples/stone.png"),
    },
    Sample {
        name: "trash",
        description: "Litter on a roadside",
        bytes: include_bytes!("../../assets/samples/trash.png"),
    },
    Sample {
        name: "bird",
        description: "Northern mockingbird",
        bytes: include_bytes!("../../assets/samples/bird.png"),
    },
    Sample {
        name: "insect",
        description: "German wasp",
        bytes: include_bytes!("../../assets/samples/insect.png"),
    },
];

/// All bundled samples, in grid order.
pub fn catalogue() -> &'static [Sample] {
    &SAMPLES
}

/// Sample at `index`, if any.
pub fn sample(index: usize) -> Option<&'static Sample> {
    SAMPLES.get(index)
}
