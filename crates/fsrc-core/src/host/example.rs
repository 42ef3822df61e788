/// Example host configuration, printed by `--example-yaml`.
pub const EXAMPLE_CONFIG: &str = "\
---
container_engine: podman
job: centos9
base_image: quay.io/centos/centos:stream9
dnf_cache: /home/example/tmp/dnf/centos9
source_dir: /home/example/devel/samba
artifacts_dir: /home/example/tmp/samba.out.d
with_ceph: true
tasks:
  - image
  - packages
";
