pub struct Sum;

impl super::Aggregation for Sum {}
