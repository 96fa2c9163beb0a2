#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Status {
    // accepting edges, no solve has finished yet
    #[default]
    Running,
    // no augmenting path is left, totals are final
    Terminated,
}
