#[evento::aggregator]
pub enum User {
    Registered { name: String, email: String },
    ProfileChanged { name: String, email: String },
    Deleted,
}
