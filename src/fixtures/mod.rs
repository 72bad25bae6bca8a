//! Deterministic fixture data for harness rendering.

/// Option list mounted by the harness frames.
pub fn demo_options() -> Vec<String> {
    [
        "Alappuzha",
        "Ernakulam",
        "Idukki",
        "Kannur",
        "Kasaragod",
        "Kerala",
        "Kochi",
        "Kollam",
        "Kottayam",
        "Kozhikode",
        "Malappuram",
        "Palakkad",
        "Thiruvananthapuram",
        "Thrissur",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}
