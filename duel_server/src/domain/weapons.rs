// Static weapon registry, addressed by 1-based slot.

/// Parameters of one weapon. Fuse 0 means "detonate on first contact".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub key: &'static str,
    pub name: &'static str,
    pub projectile_radius: f32,
    pub blast_radius: f32,
    pub max_damage: i32,
    pub fuse: f32,
    pub bounces: u32,
}

impl Weapon {
    pub fn has_fuse(&self) -> bool {
        self.fuse > 0.0
    }
}

pub const BAZOOKA: Weapon = Weapon {
    key: "bazooka",
    name: "Bazooka",
    projectile_radius: 3.5,
    blast_radius: 26.0,
    max_damage: 55,
    fuse: 0.0,
    bounces: 0,
};

pub const GRENADE: Weapon = Weapon {
    key: "grenade",
    name: "Grenade",
    projectile_radius: 4.2,
    blast_radius: 34.0,
    max_damage: 65,
    fuse: 2.6,
    bounces: 2,
};

pub const BANANA: Weapon = Weapon {
    key: "banana",
    name: "Banana",
    projectile_radius: 4.6,
    blast_radius: 46.0,
    max_damage: 85,
    fuse: 0.0,
    bounces: 0,
};

pub const CATALOG: [Weapon; 3] = [BAZOOKA, GRENADE, BANANA];

/// A validated catalog slot (1..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSlot(u8);

impl WeaponSlot {
    pub const FIRST: WeaponSlot = WeaponSlot(1);

    /// Returns `None` for slots outside the catalog.
    pub fn new(slot: u8) -> Option<Self> {
        (1..=CATALOG.len() as u8).contains(&slot).then_some(Self(slot))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn weapon(self) -> &'static Weapon {
        &CATALOG[usize::from(self.0 - 1)]
    }
}

impl Default for WeaponSlot {
    fn default() -> Self {
        Self::FIRST
    }
}
