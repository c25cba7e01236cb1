use crate::entity::{Entity, Visual};

/// Pairs cleared this session.
#[derive(Debug, Clone, Default)]
pub struct ScoreCounter {
    value: u32,
}

impl ScoreCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }
}

impl Entity for ScoreCounter {
    fn tick(&mut self) {}

    fn visuals(&self, out: &mut Vec<Visual>) {
        out.push(Visual::Score { value: self.value });
    }
}
