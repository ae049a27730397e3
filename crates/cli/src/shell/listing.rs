use rootwalk_application::services::CachedDomain;

/// Renders one `.list` line: `N domain: {KIND: data (expires in Ns), ...}`.
pub fn format_domain(index: usize, domain: &CachedDomain, now: u64) -> String {
    let entries: Vec<String> = domain
        .entries
        .iter()
        .map(|(record_type, entry)| match entry.remaining_ttl(now) {
            Some(secs) => format!("{}: {} (expires in {}s)", record_type, entry.data, secs),
            None => format!("{}: {} (expired)", record_type, entry.data),
        })
        .collect();

    format!("{} {}: {{{}}}", index, domain.domain, entries.join(", "))
}
