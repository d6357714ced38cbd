use super::{RecordData, RecordType, ResourceRecord};

/// Records of one response, grouped by kind in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub a: Vec<ResourceRecord>,
    pub aaaa: Vec<ResourceRecord>,
    pub cname: Vec<ResourceRecord>,
    pub mx: Vec<ResourceRecord>,
    pub ns: Vec<ResourceRecord>,
    pub ptr: Vec<ResourceRecord>,
    pub soa: Vec<ResourceRecord>,
    pub txt: Vec<ResourceRecord>,
    pub naptr: Vec<ResourceRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ResourceRecord) {
        let bucket = match record.data.record_type() {
            RecordType::A => &mut self.a,
            RecordType::AAAA => &mut self.aaaa,
            RecordType::CNAME => &mut self.cname,
            RecordType::MX => &mut self.mx,
            RecordType::NS => &mut self.ns,
            RecordType::PTR => &mut self.ptr,
            RecordType::SOA => &mut self.soa,
            RecordType::TXT => &mut self.txt,
            RecordType::NAPTR => &mut self.naptr,
            RecordType::ANY => return,
        };
        bucket.push(record);
    }

    /// Kinds that belong in the record stream, in emission order.
    pub fn streamed_kinds(&self) -> [&[ResourceRecord]; 8] {
        [
            &self.a,
            &self.aaaa,
            &self.cname,
            &self.mx,
            &self.ns,
            &self.ptr,
            &self.soa,
            &self.txt,
        ]
    }

    /// Number of records that would be streamed (NAPTR excluded).
    pub fn streamed_len(&self) -> usize {
        self.streamed_kinds().iter().map(|kind| kind.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.streamed_len() == 0 && self.naptr.is_empty()
    }

    pub fn cname_targets(&self) -> Vec<String> {
        self.cname
            .iter()
            .filter_map(|r| match &r.data {
                RecordData::Cname { target } => Some(target.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn ptr_names(&self) -> Vec<String> {
        self.ptr
            .iter()
            .filter_map(|r| match &r.data {
                RecordData::Ptr { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<ResourceRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = ResourceRecord>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        for record in iter {
            set.push(record);
        }
        set
    }
}
